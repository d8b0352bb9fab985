// ============================================================
// CSV PARSER
// ============================================================
// Decode uploaded bytes and parse them with a delimiter fallback chain

use crate::domain::csv::CsvTable;
use crate::domain::error::AppError;
use csv::ReaderBuilder;
use serde::Serialize;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Which parse attempt produced the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsvParseAttempt {
    /// Comma delimiter, malformed rows rejected
    Default,
    /// Semicolon delimiter, malformed rows rejected
    Semicolon,
    /// Comma delimiter, malformed rows skipped
    Lenient,
}

/// CSV parser for one delimiter/strictness combination
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Skip rows wider than the header instead of failing
    skip_malformed: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_malformed: false,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip malformed rows rather than rejecting the file
    pub fn lenient(mut self) -> Self {
        self.skip_malformed = true;
        self
    }

    fn for_attempt(attempt: CsvParseAttempt) -> Self {
        match attempt {
            CsvParseAttempt::Default => Self::new(),
            CsvParseAttempt::Semicolon => Self::new().with_delimiter(b';'),
            CsvParseAttempt::Lenient => Self::new().lenient(),
        }
    }

    /// Decode raw upload bytes: UTF-8 (BOM stripped), else Windows-1252
    pub fn decode_bytes(bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(_) => {
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                content.into_owned()
            }
        }
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::UnparsableCsv(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::UnparsableCsv(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (index, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if self.skip_malformed => {
                    debug!(row = index + 1, error = %e, "Skipping unreadable CSV row");
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    return Err(AppError::UnparsableCsv(format!(
                        "Failed to parse CSV row {}: {}",
                        index + 1,
                        e
                    )))
                }
            };

            if record.len() > headers.len() {
                if self.skip_malformed {
                    skipped += 1;
                    continue;
                }
                return Err(AppError::UnparsableCsv(format!(
                    "Expected {} fields in row {}, saw {}",
                    headers.len(),
                    index + 1,
                    record.len()
                )));
            }

            rows.push(record.iter().map(str::to_string).collect());
        }

        if skipped > 0 {
            warn!(skipped, "Skipped malformed CSV rows");
        }

        Ok(CsvTable::new(headers, rows))
    }

    /// Try the default parse, then semicolons, then a lenient parse
    pub fn parse_with_fallback(content: &str) -> Result<(CsvTable, CsvParseAttempt), AppError> {
        let attempts = [
            CsvParseAttempt::Default,
            CsvParseAttempt::Semicolon,
            CsvParseAttempt::Lenient,
        ];

        let mut last_error = None;
        for attempt in attempts {
            match Self::for_attempt(attempt).parse_content(content) {
                Ok(table) => return Ok((table, attempt)),
                Err(e) => {
                    debug!(?attempt, error = %e, "CSV parse attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::UnparsableCsv("No parse attempt was made".to_string())
        }))
    }
}
