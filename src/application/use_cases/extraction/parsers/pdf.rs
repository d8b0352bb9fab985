use super::super::{AppError, ExtractionUseCase, Result};

use crate::domain::document::{
    ExtractedDocument, SourceKind, METRIC_CHARACTERS, METRIC_PAGES, METRIC_WORDS,
};
use crate::shared::text_metrics::{char_count, word_count};
use tracing::debug;

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) fn parse_pdf(
        &self,
        bytes: &[u8],
    ) -> Result<ExtractedDocument> {
        use lopdf::Document;

        Self::ensure_not_empty(bytes.is_empty(), SourceKind::Pdf)?;

        let document = Document::load_mem(bytes)
            .map_err(|e| AppError::UnreadablePdf(format!("Failed to load PDF: {}", e)))?;

        let pages = document.get_pages();
        let mut text = String::new();

        // One segment per page, each followed by a newline
        for page_number in pages.keys() {
            let page_text = document.extract_text(&[*page_number]).map_err(|e| {
                AppError::UnreadablePdf(format!(
                    "Failed to extract text from page {}: {}",
                    page_number, e
                ))
            })?;
            debug!(page = page_number, chars = page_text.len(), "Extracted PDF page");
            text.push_str(page_text.trim_end_matches(['\r', '\n']));
            text.push('\n');
        }

        let words = word_count(&text);
        let characters = char_count(&text);

        Ok(ExtractedDocument::new(text, SourceKind::Pdf)
            .with_metric(METRIC_PAGES, pages.len() as u64)
            .with_metric(METRIC_WORDS, words)
            .with_metric(METRIC_CHARACTERS, characters))
    }
}
