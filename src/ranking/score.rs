//! Similarity scoring for candidate records.
//!
//! Two independent signals are computed per candidate:
//!
//! - **similarity**: `points_tag` per candidate tag value also present on
//!   the source, summed across every classification the two share, plus a
//!   flat `points_type` when the categories match. A book scores closer to
//!   a book than to a kitchensink.
//! - **time distance**: absolute seconds between the publication
//!   timestamps. A news article from the same period is more related than
//!   one from years away, so smaller distance wins ties.

use chrono::NaiveDateTime;

use crate::error::{RelatedError, RelatedResult};
use crate::types::{Record, ScoredCandidate, TagProfile};

/// Exact textual format of `Record::published_at`.
pub const PUBLISH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calculator for tag-overlap similarity between a source and candidates.
///
/// Carries the resolved point values so scoring is a pure lookup-and-sum
/// over the candidate's taxonomy.
pub struct SimilarityScorer {
    points_tag: u64,
    points_type: u64,
}

impl SimilarityScorer {
    /// Create a scorer with the given per-match and same-category points.
    pub fn new(points_tag: u64, points_type: u64) -> Self {
        Self {
            points_tag,
            points_type,
        }
    }

    /// Similarity of `candidate` to `source`.
    ///
    /// `profile` is the source's extracted tag profile; only classifications
    /// in it contribute. Candidates sharing nothing score 0 and remain
    /// eligible - membership filtering happened at fetch time, not here.
    pub fn score(&self, source: &Record, candidate: &Record, profile: &TagProfile) -> u64 {
        let mut similarity = 0;

        // 1. More shared tag values => higher score.
        for (classification, candidate_values) in &candidate.taxonomy {
            let Some(source_values) = profile.values_for(classification) else {
                continue;
            };
            let overlap = candidate_values.intersection(source_values).count() as u64;
            similarity += overlap * self.points_tag;
        }

        // 2. Same category => higher score.
        if source.category == candidate.category {
            similarity += self.points_type;
        }

        similarity
    }

    /// Score every candidate against the source, pairing each with its
    /// similarity and publication-time distance.
    ///
    /// Fails with [`RelatedError::MalformedTimestamp`] if any record's
    /// timestamp does not parse; a defaulted distance would corrupt the
    /// ranking order, so the error propagates instead.
    pub fn score_all(
        &self,
        source: &Record,
        candidates: Vec<Record>,
        profile: &TagProfile,
    ) -> RelatedResult<Vec<ScoredCandidate>> {
        candidates
            .into_iter()
            .map(|candidate| {
                let similarity = self.score(source, &candidate, profile);
                let distance = time_distance(source, &candidate)?;
                Ok(ScoredCandidate::new(candidate, similarity, distance))
            })
            .collect()
    }
}

/// Absolute difference in seconds between two records' publication times.
///
/// Timestamps are parsed strictly as [`PUBLISH_FORMAT`]; any failure is a
/// [`RelatedError::MalformedTimestamp`] naming the offending record.
pub fn time_distance(a: &Record, b: &Record) -> RelatedResult<u64> {
    let t1 = parse_published(a)?;
    let t2 = parse_published(b)?;
    Ok((t1 - t2).num_seconds().unsigned_abs())
}

fn parse_published(record: &Record) -> RelatedResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&record.published_at, PUBLISH_FORMAT).map_err(|_| {
        RelatedError::MalformedTimestamp {
            id: record.id,
            value: record.published_at.clone(),
        }
    })
}
