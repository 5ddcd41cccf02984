//! Pipeline orchestration - the public entry point.
//!
//! One invocation is a single linear pass:
//!
//! ```text
//! resolve options → extract profile → select categories → fetch → score → rank
//! ```
//!
//! Fetches for distinct categories are independent, so they run in parallel
//! via rayon; results are merged in category listing order, keeping the
//! output deterministic regardless of completion order. No state is shared
//! between invocations.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{Options, RelatedConfig, ResolvedOptions};
use crate::error::RelatedResult;
use crate::extraction::extract_tags;
use crate::fetch::CandidateFetcher;
use crate::ranking::{rank, SimilarityScorer};
use crate::schema::{CategorySchema, SchemaRegistry};
use crate::types::{Record, TagProfile};

/// The related-content engine: schema, configuration, and a candidate
/// fetcher, wired into one reusable pipeline.
///
/// Safe to share across threads and to invoke concurrently for different
/// source records.
pub struct RelatedEngine<F> {
    schema: SchemaRegistry,
    config: RelatedConfig,
    fetcher: F,
}

impl<F: CandidateFetcher> RelatedEngine<F> {
    pub fn new(schema: SchemaRegistry, config: RelatedConfig, fetcher: F) -> Self {
        Self {
            schema,
            config,
            fetcher,
        }
    }

    /// Records related to `record`, most similar first, at most `limit`.
    ///
    /// Returns an empty vector when the source's category declares no
    /// tag-like classification with values (no related content possible)
    /// or when the resolved limit is 0.
    ///
    /// A fetch failure for one category is logged and skipped - related
    /// content is a soft recommendation, so one unavailable category does
    /// not fail the invocation. A malformed publication timestamp does:
    /// see [`crate::error::RelatedError::MalformedTimestamp`].
    pub fn related_content_by_tags(
        &self,
        record: &Record,
        options: &Options,
    ) -> RelatedResult<Vec<Record>> {
        let opts = self.config.resolve(options);
        if opts.limit == 0 {
            return Ok(Vec::new());
        }

        let profile = extract_tags(record, &self.schema);
        if profile.is_empty() {
            debug!(
                category = %record.category,
                "source has no tag-like classifications; no related content"
            );
            return Ok(Vec::new());
        }

        let eligible = self.eligible_categories(&profile, &opts);
        debug!(
            categories = eligible.len(),
            classifications = opts.fetch_classifications.len(),
            "fetching candidates"
        );

        let batches: Vec<Vec<Record>> = eligible
            .par_iter()
            .map(|category| self.fetch_category(category, record, &profile, &opts))
            .collect();

        // Merge in category order, dropping duplicates fetched through
        // several classifications, and re-checking the source exclusion.
        let mut seen: HashSet<(String, u64)> = HashSet::new();
        let mut candidates = Vec::new();
        for batch in batches {
            for candidate in batch {
                if candidate.category == record.category && candidate.id == record.id {
                    continue;
                }
                if seen.insert((candidate.category.clone(), candidate.id)) {
                    candidates.push(candidate);
                }
            }
        }
        debug!(candidates = candidates.len(), "scoring candidates");

        let scorer = SimilarityScorer::new(opts.points_tag, opts.points_type);
        let scored = scorer.score_all(record, candidates, &profile)?;

        Ok(rank(scored, opts.limit))
    }

    /// Categories worth searching: allowed by the option allow-list and
    /// declaring at least one of the source's extracted classifications.
    fn eligible_categories(
        &self,
        profile: &TagProfile,
        opts: &ResolvedOptions,
    ) -> Vec<&CategorySchema> {
        self.schema
            .categories()
            .filter(|category| opts.allows_category(&category.slug))
            .filter(|category| {
                category
                    .classifications
                    .iter()
                    .any(|name| profile.classifications.contains(name))
            })
            .collect()
    }

    /// All candidates for one category, across the configured fetch
    /// classifications. Fetch failures are logged and skipped.
    fn fetch_category(
        &self,
        category: &CategorySchema,
        source: &Record,
        profile: &TagProfile,
        opts: &ResolvedOptions,
    ) -> Vec<Record> {
        let exclude_id = (category.slug == source.category).then_some(source.id);

        let mut out = Vec::new();
        for classification in &opts.fetch_classifications {
            let Some(values) = profile.values_for(classification) else {
                continue;
            };
            match self
                .fetcher
                .fetch(&category.slug, classification, values, exclude_id)
            {
                Ok(records) => out.extend(records),
                Err(err) => {
                    warn!(
                        category = %category.slug,
                        classification = %classification,
                        error = %err,
                        "candidate fetch failed; skipping"
                    );
                }
            }
        }
        out
    }
}
