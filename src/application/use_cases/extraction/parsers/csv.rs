use super::super::{ExtractionUseCase, Result};

use crate::domain::document::{
    ExtractedDocument, SourceKind, METRIC_COLUMNS, METRIC_DUPLICATE_ROWS, METRIC_MISSING_VALUES,
    METRIC_ROWS,
};
use crate::infrastructure::csv::{CsvParseAttempt, CsvParser};
use tracing::info;

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) fn parse_csv(
        &self,
        bytes: &[u8],
    ) -> Result<(ExtractedDocument, CsvParseAttempt)> {
        Self::ensure_not_empty(bytes.is_empty(), SourceKind::Csv)?;

        let content = CsvParser::decode_bytes(bytes);
        let (table, attempt) = CsvParser::parse_with_fallback(&content)?;

        info!(
            ?attempt,
            rows = table.row_count(),
            columns = table.column_count(),
            "CSV parsed"
        );

        let document = ExtractedDocument::new(table.render(), SourceKind::Csv)
            .with_metric(METRIC_ROWS, table.row_count() as u64)
            .with_metric(METRIC_COLUMNS, table.column_count() as u64)
            .with_metric(METRIC_MISSING_VALUES, table.missing_value_count() as u64)
            .with_metric(METRIC_DUPLICATE_ROWS, table.duplicate_row_count() as u64);

        Ok((document, attempt))
    }
}

#[cfg(test)]
mod tests {
    use crate::application::use_cases::extraction::ExtractionUseCase;
    use crate::domain::document::{
        METRIC_COLUMNS, METRIC_DUPLICATE_ROWS, METRIC_MISSING_VALUES, METRIC_ROWS,
    };
    use crate::domain::error::AppError;
    use crate::infrastructure::config::FetchConfig;
    use crate::infrastructure::csv::CsvParseAttempt;

    fn use_case() -> ExtractionUseCase {
        ExtractionUseCase::new(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_well_formed_csv_first_attempt() {
        let bytes = b"name,age,city\nAlice,30,NYC\nBob,,LA\nAlice,30,NYC\n";
        let (document, attempt) = use_case().parse_csv(bytes).unwrap();

        assert_eq!(attempt, CsvParseAttempt::Default);
        assert_eq!(document.metric(METRIC_ROWS), Some(3));
        assert_eq!(document.metric(METRIC_COLUMNS), Some(3));
        assert_eq!(document.metric(METRIC_MISSING_VALUES), Some(1));
        assert_eq!(document.metric(METRIC_DUPLICATE_ROWS), Some(1));
        assert!(document.text.starts_with("    name"));
        assert!(document.text.contains("Bob"));
    }

    #[test]
    fn test_semicolon_csv_uses_fallback() {
        let bytes = "produkt;preis\nKäse;3,50\nBrot;2,10\n".as_bytes();
        let (document, attempt) = use_case().parse_csv(bytes).unwrap();

        assert_eq!(attempt, CsvParseAttempt::Semicolon);
        assert_eq!(document.metric(METRIC_ROWS), Some(2));
        assert_eq!(document.metric(METRIC_COLUMNS), Some(2));
        assert!(document.text.contains("Käse"));
    }

    #[test]
    fn test_blank_csv_is_unparsable() {
        let err = use_case().parse_csv(b"\n\n").unwrap_err();
        assert!(matches!(err, AppError::UnparsableCsv(_)));
    }
}
