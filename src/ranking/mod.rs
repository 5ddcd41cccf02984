//! Ranking pipeline - from candidates to an ordered, bounded result.
//!
//! The ranking system combines:
//! - Tag-overlap scoring (points per matching value across shared
//!   classifications)
//! - A flat same-category bonus
//! - Publication-time distance as the first tie-break
//! - Case-insensitive title order as the final tie-break

mod rank;
mod score;

pub use rank::rank;
pub use score::{time_distance, SimilarityScorer, PUBLISH_FORMAT};
