//! Core types for relatag - records, tag profiles, and scored candidates.
//!
//! Key design decisions:
//! - `Record` is a read-only snapshot of a CMS content item; the pipeline
//!   never mutates one. Computed ranking fields live on `ScoredCandidate`.
//! - BTree containers throughout, so iteration order is deterministic and
//!   repeated invocations with identical inputs produce identical output.
//! - `published_at` stays the raw timestamp text as stored by the CMS; it is
//!   parsed (strictly) only when a time distance is actually needed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Publication status of a content record.
///
/// Only `Published` records are eligible related-content candidates; the
/// other statuses exist so records round-trip through the fetcher boundary
/// without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Visible on the site.
    Published,
    /// Work in progress, not yet visible.
    Draft,
    /// Taken offline after publication.
    Held,
    /// Scheduled for future publication.
    Timed,
}

impl RecordStatus {
    /// Check whether a record with this status may appear in results.
    pub fn is_published(self) -> bool {
        matches!(self, RecordStatus::Published)
    }
}

/// A content record as consumed from the surrounding CMS.
///
/// `taxonomy` maps classification names (e.g. "tags", "chapters") to the
/// unordered set of values the record holds for that classification. Which
/// names are meaningful for a record is declared by its category's schema,
/// not by the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier within the record's category.
    pub id: u64,
    /// Category (content type) slug, e.g. "book" or "article".
    pub category: String,
    /// Classification name → set of values held by this record.
    #[serde(default)]
    pub taxonomy: BTreeMap<String, BTreeSet<String>>,
    /// Publication timestamp, raw `"YYYY-MM-DD HH:MM:SS"` text.
    pub published_at: String,
    /// Display title, used as the final ranking tie-break.
    pub title: String,
    /// Publication status.
    pub status: RecordStatus,
}

impl Record {
    /// Values this record holds for a classification, if any.
    pub fn values(&self, classification: &str) -> Option<&BTreeSet<String>> {
        self.taxonomy.get(classification)
    }
}

/// The tag-like classifications a source record participates in, and the
/// values it holds in each. Produced by [`crate::extraction::extract_tags`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagProfile {
    /// Tag-like classification names with at least one value on the source.
    pub classifications: BTreeSet<String>,
    /// Classification name → the source's value set for it.
    pub values: BTreeMap<String, BTreeSet<String>>,
}

impl TagProfile {
    /// Record a classification and its values on the profile.
    pub fn insert(&mut self, classification: &str, values: BTreeSet<String>) {
        self.classifications.insert(classification.to_string());
        self.values.insert(classification.to_string(), values);
    }

    /// True when the source participates in no tag-like classification at
    /// all. Callers must treat this as "no related content possible".
    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty()
    }

    /// The source's value set for a classification, if extracted.
    pub fn values_for(&self, classification: &str) -> Option<&BTreeSet<String>> {
        self.values.get(classification)
    }
}

/// A candidate record paired with its computed ranking inputs.
///
/// Transient: created and discarded within one pipeline invocation. The
/// wrapped `Record` is never mutated; similarity and time distance live
/// here instead.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The candidate record.
    pub record: Record,
    /// Tag-overlap score plus same-category bonus. Non-negative, unbounded.
    pub similarity: u64,
    /// Seconds between the candidate's and the source's publication times.
    pub time_distance: u64,
}

impl ScoredCandidate {
    pub fn new(record: Record, similarity: u64, time_distance: u64) -> Self {
        Self {
            record,
            similarity,
            time_distance,
        }
    }

    /// Unwrap the record, discarding the computed fields.
    pub fn into_record(self) -> Record {
        self.record
    }
}
