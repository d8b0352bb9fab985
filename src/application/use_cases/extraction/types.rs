use crate::domain::document::SourceKind;

/// Raw user input; the variant decides which extractor runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionInput {
    Text(String),
    /// Uploaded PDF bytes
    Pdf(Vec<u8>),
    /// Uploaded CSV bytes
    Csv(Vec<u8>),
    Url(String),
}

impl ExtractionInput {
    pub fn kind(&self) -> SourceKind {
        match self {
            ExtractionInput::Text(_) => SourceKind::Text,
            ExtractionInput::Pdf(_) => SourceKind::Pdf,
            ExtractionInput::Csv(_) => SourceKind::Csv,
            ExtractionInput::Url(_) => SourceKind::Url,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ExtractionInput::Text(text) | ExtractionInput::Url(text) => text.len(),
            ExtractionInput::Pdf(bytes) | ExtractionInput::Csv(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
