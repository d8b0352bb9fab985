use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    EmptyInput,
    UnreadablePdf(String),
    UnparsableCsv(String),
    FetchError(String),
    MissingApiKey,
    UpstreamError(String),
    ExportError(String),
    NoDocument,
    ConfigError(String),
}

impl AppError {
    /// One-line message shown to the user at the presentation boundary.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyInput => "Please provide some input before processing.".to_string(),
            AppError::UnreadablePdf(msg) => format!("Error processing PDF: {}", msg),
            AppError::UnparsableCsv(_) => "Error processing CSV: the file appears to be invalid or corrupted. Check for irregular delimiters, mixed data types, or special characters.".to_string(),
            AppError::FetchError(msg) => format!("Error processing URL: {}", msg),
            AppError::MissingApiKey => "Please configure your Gemini API key first.".to_string(),
            AppError::UpstreamError(msg) => format!("Error during analysis: {}", msg),
            AppError::ExportError(msg) => format!("Export failed: {}", msg),
            AppError::NoDocument => "Please process a document first before analysis.".to_string(),
            AppError::ConfigError(msg) => format!("Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EmptyInput => write!(f, "Empty input"),
            AppError::UnreadablePdf(msg) => write!(f, "Unreadable PDF: {}", msg),
            AppError::UnparsableCsv(msg) => write!(f, "Unparsable CSV: {}", msg),
            AppError::FetchError(msg) => write!(f, "Fetch error: {}", msg),
            AppError::MissingApiKey => write!(f, "Missing API key"),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            AppError::ExportError(msg) => write!(f, "Export error: {}", msg),
            AppError::NoDocument => write!(f, "No document has been processed"),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Only the exporter touches the filesystem.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ExportError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
