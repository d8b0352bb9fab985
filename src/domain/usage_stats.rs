use crate::domain::document::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_processed: u64,
    pub successful_queries: u64,
    pub counts_by_kind: BTreeMap<SourceKind, u64>,
}

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            total_processed: 0,
            successful_queries: 0,
            counts_by_kind: SourceKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
        }
    }
}

impl UsageStats {
    pub fn record_extraction(&mut self, kind: SourceKind) {
        self.total_processed += 1;
        *self.counts_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn record_query(&mut self) {
        self.successful_queries += 1;
    }

    pub fn count_for(&self, kind: SourceKind) -> u64 {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_zeroed(&self) -> bool {
        self.total_processed == 0
            && self.successful_queries == 0
            && self.counts_by_kind.values().all(|count| *count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_every_kind() {
        let stats = UsageStats::default();
        assert_eq!(stats.counts_by_kind.len(), 4);
        assert!(stats.is_zeroed());
    }

    #[test]
    fn test_record_extraction_bumps_total_and_kind() {
        let mut stats = UsageStats::default();
        stats.record_extraction(SourceKind::Pdf);
        stats.record_extraction(SourceKind::Pdf);
        stats.record_extraction(SourceKind::Url);

        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.count_for(SourceKind::Pdf), 2);
        assert_eq!(stats.count_for(SourceKind::Url), 1);
        assert_eq!(stats.count_for(SourceKind::Text), 0);
    }

    #[test]
    fn test_counts_serialize_with_kind_labels() {
        let value = serde_json::to_value(UsageStats::default()).unwrap();
        assert_eq!(value["counts_by_kind"]["PDF"], 0);
        assert_eq!(value["counts_by_kind"]["Text"], 0);
    }
}
