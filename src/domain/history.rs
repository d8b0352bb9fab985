use crate::domain::document::SourceKind;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub query: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub source_kind: SourceKind,
}

impl HistoryEntry {
    pub fn new(query: String, answer: String, source_kind: SourceKind) -> Self {
        Self::at(Local::now().naive_local(), query, answer, source_kind)
    }

    pub fn at(
        time: NaiveDateTime,
        query: String,
        answer: String,
        source_kind: SourceKind,
    ) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            query,
            answer,
            source_kind,
        }
    }
}

/// Append-only log of answered questions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Entries in chronological order, newest last.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries newest first, the order they are displayed in.
    pub fn recent(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
