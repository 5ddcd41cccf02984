//! Error types for relatag.

use thiserror::Error;

/// Top-level error type for the related-content pipeline.
#[derive(Debug, Error)]
pub enum RelatedError {
    /// A record's publication timestamp did not parse in the required
    /// format. This aborts the invocation: substituting a default distance
    /// would silently corrupt the ranking order.
    #[error("malformed publication timestamp on record {id}: {value:?} (expected \"YYYY-MM-DD HH:MM:SS\")")]
    MalformedTimestamp { id: u64, value: String },

    /// A candidate fetch failed for one category. The engine itself handles
    /// fetch failures by skipping the category; this variant surfaces when a
    /// caller drives a fetcher directly.
    #[error("candidate fetch failed for category {category}: {source}")]
    Fetch {
        category: String,
        #[source]
        source: FetchError,
    },
}

/// Error reported by a [`crate::fetch::CandidateFetcher`] implementation.
///
/// Storage backends differ too much for a shared structured error, so this
/// carries an opaque message from the implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type RelatedResult<T> = Result<T, RelatedError>;
