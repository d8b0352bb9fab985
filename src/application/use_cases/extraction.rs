use crate::application::use_cases::web_fetcher::WebFetcher;
use crate::domain::document::{ExtractedDocument, SourceKind};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::FetchConfig;
use tracing::{info, warn};

mod parsers;
mod types;

pub use types::ExtractionInput;

/// Turns one user-submitted input into an `ExtractedDocument`.
pub struct ExtractionUseCase {
    web_fetcher: WebFetcher,
}

impl ExtractionUseCase {
    pub fn new(fetch_config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            web_fetcher: WebFetcher::new(fetch_config)?,
        })
    }

    pub async fn extract(&self, input: ExtractionInput) -> Result<ExtractedDocument> {
        let kind = input.kind();
        info!(kind = %kind, bytes = input.len(), "Extracting document");

        let result = match input {
            ExtractionInput::Text(text) => self.parse_txt(text),
            ExtractionInput::Pdf(bytes) => self.parse_pdf(&bytes),
            ExtractionInput::Csv(bytes) => self.parse_csv(&bytes).map(|(document, _)| document),
            ExtractionInput::Url(url) => self.parse_web(&url).await,
        };

        match &result {
            Ok(document) => info!(
                kind = %kind,
                metrics = ?document.metrics,
                "Extraction complete"
            ),
            Err(e) => warn!(kind = %kind, error = %e, "Extraction failed"),
        }

        result
    }

    fn ensure_not_empty(is_empty: bool, kind: SourceKind) -> Result<()> {
        if is_empty {
            warn!(kind = %kind, "Empty input rejected");
            return Err(AppError::EmptyInput);
        }
        Ok(())
    }
}
