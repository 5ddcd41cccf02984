//! relatag - related-content recommendations by shared tags
//!
//! Computes, for a content record in a CMS, a ranked list of related
//! records from shared tag-like classifications and publication recency.
//!
//! # Architecture
//!
//! ```text
//! Tag Extraction → Candidate Fetch → Similarity Scoring → Ranking
//!       ↓                ↓                  ↓               ↓
//!    schema          fetcher trait     tag overlap +    composite
//!    registry        (storage is       same-category    sort key,
//!                    external)         bonus            top-N cut
//! ```
//!
//! The storage layer is deliberately outside the crate: implement
//! [`CandidateFetcher`] over whatever holds your records, then drive the
//! pipeline through [`RelatedEngine::related_content_by_tags`].
//!
//! ```
//! use relatag::{
//!     ClassificationKind, MemoryFetcher, Options, Record, RecordStatus,
//!     RelatedConfig, RelatedEngine, SchemaRegistry,
//! };
//!
//! let schema = SchemaRegistry::new()
//!     .with_classification("tags", ClassificationKind::Tags)
//!     .with_category("book", &["tags"]);
//!
//! let source = Record {
//!     id: 1,
//!     category: "book".into(),
//!     taxonomy: [("tags".into(), ["sci-fi".into()].into())].into(),
//!     published_at: "2024-03-01 09:00:00".into(),
//!     title: "Source".into(),
//!     status: RecordStatus::Published,
//! };
//!
//! let engine = RelatedEngine::new(schema, RelatedConfig::default(), MemoryFetcher::default());
//! let related = engine.related_content_by_tags(&source, &Options::default()).unwrap();
//! assert!(related.is_empty());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod ranking;
pub mod schema;
pub mod types;

// Re-export core types
pub use types::{Record, RecordStatus, ScoredCandidate, TagProfile};

// Re-export the pipeline surface
pub use config::{Options, RelatedConfig, ResolvedOptions};
pub use engine::RelatedEngine;
pub use error::{FetchError, RelatedError, RelatedResult};
pub use extraction::extract_tags;
pub use fetch::{CandidateFetcher, MemoryFetcher};
pub use ranking::{rank, time_distance, SimilarityScorer, PUBLISH_FORMAT};
pub use schema::{CategorySchema, ClassificationKind, SchemaRegistry};
