//! Tag profile extraction from source records.
//!
//! This module handles:
//! - Resolving which of a record's classifications behave like tags
//! - Collecting the record's values for each of those classifications
//! - Producing the [`crate::types::TagProfile`] the rest of the pipeline
//!   keys off

mod tags;

pub use tags::extract_tags;
