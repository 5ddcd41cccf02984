//! Tag profile extraction.
//!
//! A record participates in related-content matching through the tag-like
//! classifications its category declares. Extraction walks those
//! declarations in order and keeps each classification that both behaves
//! like tags and holds at least one value on the record.

use crate::schema::SchemaRegistry;
use crate::types::{Record, TagProfile};

/// Extract the tag-like classifications and values a record participates in.
///
/// This is the entry point of the pipeline. For each classification name
/// declared on the record's category, the schema decides whether it behaves
/// like tags; classifications without any value on the record are skipped.
///
/// Returns an empty profile when the record's category is unknown to the
/// schema or declares no usable classification - callers must treat that as
/// "no related content possible" and short-circuit.
///
/// Pure function of its inputs; the record is not modified.
pub fn extract_tags(record: &Record, schema: &SchemaRegistry) -> TagProfile {
    let mut profile = TagProfile::default();

    let Some(category) = schema.category(&record.category) else {
        return profile;
    };

    for classification in &category.classifications {
        if !schema.is_tag_like(&record.category, classification) {
            continue;
        }
        match record.values(classification) {
            Some(values) if !values.is_empty() => {
                profile.insert(classification, values.clone());
            }
            _ => {}
        }
    }

    profile
}
