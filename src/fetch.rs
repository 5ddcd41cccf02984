//! Candidate fetcher boundary.
//!
//! The datastore holding content records is an external collaborator; the
//! pipeline only needs one capability from it: "published records of a
//! category whose values for one classification intersect a given set".
//! [`CandidateFetcher`] is that seam. Implementations own their query
//! mechanics, timeouts, and retries; the engine applies its own result
//! limit later.
//!
//! [`MemoryFetcher`] is a complete in-memory implementation used by the
//! tests and demos, and as a reference for the contract.

use std::collections::BTreeSet;

use crate::error::FetchError;
use crate::types::Record;

/// Storage-side candidate retrieval.
///
/// Contract, per call:
/// - only records with published status are returned
/// - every returned record's value set for `classification` intersects
///   `values` (the engine re-scores by degree of overlap, it does not
///   re-filter membership)
/// - a record whose id equals `exclude_id` is omitted (the engine passes
///   the source's id exactly when fetching the source's own category)
/// - results are ordered by publication time, newest first, with no hard
///   cap
///
/// Implementations must be `Send + Sync`: the engine issues fetches for
/// distinct categories in parallel.
pub trait CandidateFetcher: Send + Sync {
    fn fetch(
        &self,
        category: &str,
        classification: &str,
        values: &BTreeSet<String>,
        exclude_id: Option<u64>,
    ) -> Result<Vec<Record>, FetchError>;
}

/// In-memory fetcher over a fixed record slice.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    records: Vec<Record>,
}

impl MemoryFetcher {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Add one record to the corpus.
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl CandidateFetcher for MemoryFetcher {
    fn fetch(
        &self,
        category: &str,
        classification: &str,
        values: &BTreeSet<String>,
        exclude_id: Option<u64>,
    ) -> Result<Vec<Record>, FetchError> {
        let mut matches: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.category == category)
            .filter(|r| r.status.is_published())
            .filter(|r| exclude_id != Some(r.id))
            .filter(|r| {
                r.values(classification)
                    .is_some_and(|held| held.intersection(values).next().is_some())
            })
            .cloned()
            .collect();

        // The fixed-width timestamp format sorts lexicographically in
        // chronological order; reverse for newest-first.
        matches.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordStatus;
    use std::collections::BTreeMap;

    fn make_record(id: u64, category: &str, tags: &[&str], published_at: &str) -> Record {
        let mut taxonomy = BTreeMap::new();
        taxonomy.insert(
            "tags".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        Record {
            id,
            category: category.to_string(),
            taxonomy,
            published_at: published_at.to_string(),
            title: format!("record {id}"),
            status: RecordStatus::Published,
        }
    }

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fetch_filters_by_intersection() {
        let fetcher = MemoryFetcher::new(vec![
            make_record(1, "book", &["sci-fi"], "2024-01-01 00:00:00"),
            make_record(2, "book", &["romance"], "2024-01-02 00:00:00"),
            make_record(3, "article", &["sci-fi"], "2024-01-03 00:00:00"),
        ]);

        let found = fetcher
            .fetch("book", "tags", &tag_set(&["sci-fi", "drama"]), None)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_fetch_excludes_id() {
        let fetcher = MemoryFetcher::new(vec![
            make_record(1, "book", &["sci-fi"], "2024-01-01 00:00:00"),
            make_record(2, "book", &["sci-fi"], "2024-01-02 00:00:00"),
        ]);

        let found = fetcher
            .fetch("book", "tags", &tag_set(&["sci-fi"]), Some(1))
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_fetch_only_published() {
        let mut draft = make_record(1, "book", &["sci-fi"], "2024-01-01 00:00:00");
        draft.status = RecordStatus::Draft;
        let mut held = make_record(2, "book", &["sci-fi"], "2024-01-02 00:00:00");
        held.status = RecordStatus::Held;
        let fetcher = MemoryFetcher::new(vec![
            draft,
            held,
            make_record(3, "book", &["sci-fi"], "2024-01-03 00:00:00"),
        ]);

        let found = fetcher
            .fetch("book", "tags", &tag_set(&["sci-fi"]), None)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);
    }

    #[test]
    fn test_fetch_newest_first() {
        let fetcher = MemoryFetcher::new(vec![
            make_record(1, "book", &["sci-fi"], "2023-06-15 08:00:00"),
            make_record(2, "book", &["sci-fi"], "2024-02-01 09:30:00"),
            make_record(3, "book", &["sci-fi"], "2023-12-31 23:59:59"),
        ]);

        let found = fetcher
            .fetch("book", "tags", &tag_set(&["sci-fi"]), None)
            .unwrap();

        let ids: Vec<u64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_fetch_unknown_classification_is_empty() {
        let fetcher = MemoryFetcher::new(vec![make_record(
            1,
            "book",
            &["sci-fi"],
            "2024-01-01 00:00:00",
        )]);

        let found = fetcher
            .fetch("book", "mood", &tag_set(&["dark"]), None)
            .unwrap();
        assert!(found.is_empty());
    }
}
