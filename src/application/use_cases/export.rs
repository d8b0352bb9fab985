use crate::domain::document::SourceKind;
use crate::domain::error::{AppError, Result};
use crate::domain::history::{HistoryEntry, TIMESTAMP_FORMAT};
use crate::infrastructure::pdf_report::{PdfReportBuilder, TextStyle};
use crate::infrastructure::storage::write_export_file;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_FILE_NAME: &str = "docugenius_history.csv";
pub const JSON_FILE_NAME: &str = "docugenius_history.json";
pub const PDF_FILE_NAME: &str = "docugenius_history_report.pdf";
pub const REPORT_TITLE: &str = "DocuGenius Pro Analysis History Report";

// Point sizes for the vertical gaps in the PDF report
const SECTION_GAP: f32 = 18.0;
const ENTRY_GAP: f32 = 10.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    #[serde(rename = "CSV", alias = "csv")]
    Csv,
    #[serde(rename = "JSON", alias = "json")]
    Json,
    #[serde(rename = "PDF Report", alias = "pdf", alias = "PDF")]
    Pdf,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Json => JSON_FILE_NAME,
            ExportFormat::Pdf => PDF_FILE_NAME,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// Comma-delimited, header `timestamp,query,answer,type`.
pub fn export_csv(history: &[HistoryEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["timestamp", "query", "answer", "type"])
        .map_err(|e| AppError::ExportError(format!("Failed to write CSV header: {}", e)))?;
    for entry in history {
        writer
            .write_record([
                entry.timestamp.as_str(),
                entry.query.as_str(),
                entry.answer.as_str(),
                entry.source_kind.label(),
            ])
            .map_err(|e| AppError::ExportError(format!("Failed to write CSV row: {}", e)))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::ExportError(format!("Failed to flush CSV: {}", e)))
}

/// Array of entry objects, four-space indent.
pub fn export_json(history: &[HistoryEntry]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    history
        .serialize(&mut serializer)
        .map_err(|e| AppError::ExportError(format!("Failed to serialize JSON: {}", e)))?;
    Ok(bytes)
}

/// Report with title, generation time, summary and one block per entry,
/// oldest entry first.
pub fn export_pdf(history: &[HistoryEntry]) -> Result<Vec<u8>> {
    let generated_at = Local::now().format(TIMESTAMP_FORMAT).to_string();

    let mut report = PdfReportBuilder::new();
    report
        .paragraph(TextStyle::Title, REPORT_TITLE)
        .paragraph(TextStyle::Normal, format!("Generated on: {}", generated_at))
        .spacer(SECTION_GAP)
        .paragraph(TextStyle::Heading, "Summary")
        .paragraph(TextStyle::Normal, format!("Total Queries: {}", history.len()))
        .paragraph(
            TextStyle::Normal,
            format!("Document Types: {}", kind_breakdown(history)),
        )
        .spacer(SECTION_GAP)
        .paragraph(TextStyle::Heading, "Analysis History");

    for (idx, entry) in history.iter().enumerate() {
        report
            .paragraph(
                TextStyle::Heading,
                format!(
                    "Entry #{} - {} ({})",
                    idx + 1,
                    entry.timestamp,
                    entry.source_kind
                ),
            )
            .paragraph(TextStyle::Normal, format!("Query: {}", entry.query))
            .paragraph(TextStyle::Normal, format!("Answer: {}", entry.answer))
            .spacer(ENTRY_GAP);
    }

    report.build()
}

/// `PDF: 2, Text: 1` in first-seen order.
pub fn kind_breakdown(history: &[HistoryEntry]) -> String {
    let mut counts: Vec<(SourceKind, usize)> = Vec::new();
    for entry in history {
        match counts.iter_mut().find(|(kind, _)| *kind == entry.source_kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.source_kind, 1)),
        }
    }
    counts
        .iter()
        .map(|(kind, count)| format!("{}: {}", kind, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn export(history: &[HistoryEntry], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => export_csv(history),
        ExportFormat::Json => export_json(history),
        ExportFormat::Pdf => export_pdf(history),
    }
}

/// Write each requested format to its fixed file name under `dir`,
/// overwriting existing files.
pub fn write_exports(
    history: &[HistoryEntry],
    formats: &[ExportFormat],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    if history.is_empty() {
        return Err(AppError::ExportError("No history data to export".to_string()));
    }
    if formats.is_empty() {
        return Err(AppError::ExportError("No export format selected".to_string()));
    }

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let bytes = export(history, *format)?;
        let path = write_export_file(dir, format.file_name(), &bytes)?;
        info!(path = %path.display(), entries = history.len(), "Exported history");
        written.push(path);
    }
    Ok(written)
}
