use super::super::{ExtractionUseCase, Result};

use crate::domain::document::{ExtractedDocument, SourceKind, METRIC_CHARACTERS, METRIC_WORDS};
use crate::shared::text_metrics::{char_count, word_count};

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) async fn parse_web(
        &self,
        url: &str,
    ) -> Result<ExtractedDocument> {
        Self::ensure_not_empty(url.trim().is_empty(), SourceKind::Url)?;

        let text = self.web_fetcher.fetch_text(url).await?;
        let words = word_count(&text);
        let characters = char_count(&text);

        Ok(ExtractedDocument::new(text, SourceKind::Url)
            .with_metric(METRIC_WORDS, words)
            .with_metric(METRIC_CHARACTERS, characters))
    }
}
