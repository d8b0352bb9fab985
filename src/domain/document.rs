use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const METRIC_PAGES: &str = "pages";
pub const METRIC_WORDS: &str = "words";
pub const METRIC_CHARACTERS: &str = "characters";
pub const METRIC_ROWS: &str = "rows";
pub const METRIC_COLUMNS: &str = "columns";
pub const METRIC_MISSING_VALUES: &str = "missing_values";
pub const METRIC_DUPLICATE_ROWS: &str = "duplicate_rows";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Text,
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "CSV")]
    Csv,
    #[serde(rename = "URL")]
    Url,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Pdf,
        SourceKind::Csv,
        SourceKind::Url,
        SourceKind::Text,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Text => "Text",
            SourceKind::Pdf => "PDF",
            SourceKind::Csv => "CSV",
            SourceKind::Url => "URL",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type Metrics = BTreeMap<String, u64>;

/// Text pulled out of one input, plus the counts shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub source_kind: SourceKind,
    pub metrics: Metrics,
}

impl ExtractedDocument {
    pub fn new(text: String, source_kind: SourceKind) -> Self {
        Self {
            text,
            source_kind,
            metrics: Metrics::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: u64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn metric(&self, name: &str) -> Option<u64> {
        self.metrics.get(name).copied()
    }

    /// First `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.text[..cut]),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_labels_serialize() {
        let json = serde_json::to_string(&SourceKind::Pdf).unwrap();
        assert_eq!(json, "\"PDF\"");
        let kind: SourceKind = serde_json::from_str("\"Text\"").unwrap();
        assert_eq!(kind, SourceKind::Text);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let doc = ExtractedDocument::new("abcdef".to_string(), SourceKind::Text);
        assert_eq!(doc.preview(3), "abc...");
        assert_eq!(doc.preview(6), "abcdef");
        assert_eq!(doc.preview(100), "abcdef");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let doc = ExtractedDocument::new("héllo".to_string(), SourceKind::Text);
        assert_eq!(doc.preview(2), "hé...");
    }
}
