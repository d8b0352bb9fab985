use super::super::{ExtractionUseCase, Result};

use crate::domain::document::{ExtractedDocument, SourceKind, METRIC_CHARACTERS, METRIC_WORDS};
use crate::shared::text_metrics::{char_count, word_count};

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) fn parse_txt(
        &self,
        text: String,
    ) -> Result<ExtractedDocument> {
        Self::ensure_not_empty(text.is_empty(), SourceKind::Text)?;

        let words = word_count(&text);
        let characters = char_count(&text);

        // Stored verbatim, whitespace included
        Ok(ExtractedDocument::new(text, SourceKind::Text)
            .with_metric(METRIC_WORDS, words)
            .with_metric(METRIC_CHARACTERS, characters))
    }
}

#[cfg(test)]
mod tests {
    use crate::application::use_cases::extraction::ExtractionUseCase;
    use crate::infrastructure::config::FetchConfig;

    #[test]
    fn test_whitespace_is_preserved() {
        let uc = ExtractionUseCase::new(&FetchConfig::default()).unwrap();
        let document = uc.parse_txt("  padded\n".to_string()).unwrap();
        assert_eq!(document.text, "  padded\n");
    }
}
