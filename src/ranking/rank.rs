//! Candidate ordering and truncation.

use std::cmp::Reverse;

use crate::types::{Record, ScoredCandidate};

/// Order scored candidates and truncate to `limit` records.
///
/// Stable sort on the composite key
/// `(similarity descending, time distance ascending, lowercase title)`.
/// Returns all candidates when fewer than `limit` exist; `limit` 0 returns
/// an empty vector.
pub fn rank(mut scored: Vec<ScoredCandidate>, limit: usize) -> Vec<Record> {
    if limit == 0 {
        return Vec::new();
    }

    scored.sort_by_cached_key(|candidate| {
        (
            Reverse(candidate.similarity),
            candidate.time_distance,
            candidate.record.title.to_lowercase(),
        )
    });

    scored
        .into_iter()
        .take(limit)
        .map(ScoredCandidate::into_record)
        .collect()
}
