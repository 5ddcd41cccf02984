//! Configuration defaults and per-call options.
//!
//! Two layers, mirroring how the surrounding CMS exposes the feature:
//! - [`RelatedConfig`]: site-wide defaults, loadable from `related.toml`
//! - [`Options`]: per-call overrides supplied by the template layer
//!
//! `RelatedConfig::resolve` merges the two into a [`ResolvedOptions`] the
//! pipeline consumes.
//!
//! ## Example
//!
//! ```toml
//! [points]
//! tag = 10
//! type = 10
//!
//! limit = 10
//! fetch-classifications = ["tags"]
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default score per matching tag value.
pub const DEFAULT_POINTS_TAG: u64 = 10;
/// Default bonus for a same-category candidate.
pub const DEFAULT_POINTS_TYPE: u64 = 10;
/// Default maximum number of results.
pub const DEFAULT_LIMIT: usize = 10;
/// Default classification whose values parameterize the fetch-time filter.
pub const DEFAULT_FETCH_CLASSIFICATION: &str = "tags";

/// Site-wide defaults for the related-content pipeline.
#[derive(Debug, Clone)]
pub struct RelatedConfig {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,

    /// Score added per candidate tag value also present on the source.
    pub points_tag: u64,

    /// Flat bonus when candidate and source share a category.
    pub points_type: u64,

    /// Maximum number of results returned.
    pub limit: usize,

    /// Classification names whose values are passed to the candidate
    /// fetcher as the tag filter.
    ///
    /// Known limitation of the default: only the `"tags"` classification
    /// parameterizes the fetch, so candidates overlapping the source solely
    /// through another tag-like classification are not retrieved (they still
    /// score on that overlap when retrieved for another reason). List the
    /// extra classifications here to widen the fetch.
    pub fetch_classifications: Vec<String>,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            source: None,
            points_tag: DEFAULT_POINTS_TAG,
            points_type: DEFAULT_POINTS_TYPE,
            limit: DEFAULT_LIMIT,
            fetch_classifications: vec![DEFAULT_FETCH_CLASSIFICATION.to_string()],
        }
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    points: Option<RawPoints>,
    limit: Option<usize>,
    fetch_classifications: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct RawPoints {
    tag: Option<u64>,
    #[serde(rename = "type")]
    type_: Option<u64>,
}

impl RelatedConfig {
    /// Load configuration from the given directory.
    ///
    /// Search order:
    /// 1. related.toml in the directory
    /// 2. Walk up parent directories for related.toml
    /// 3. Default config if nothing found
    pub fn load(directory: &Path) -> Self {
        let mut current = Some(directory);
        while let Some(dir) = current {
            let candidate = dir.join("related.toml");
            if candidate.exists() {
                if let Some(config) = Self::load_file(&candidate) {
                    return config;
                }
            }
            current = dir.parent();
        }
        Self::default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let raw: RawConfig = toml::from_str(&content).ok()?;
        Some(Self::from_raw(raw, path.to_path_buf()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(text)?;
        let mut config = Self::from_raw(raw, PathBuf::new());
        config.source = None;
        Ok(config)
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Self {
        let defaults = Self::default();
        let points = raw.points.unwrap_or_default();
        Self {
            source: Some(source),
            points_tag: points.tag.unwrap_or(defaults.points_tag),
            points_type: points.type_.unwrap_or(defaults.points_type),
            limit: raw.limit.unwrap_or(defaults.limit),
            fetch_classifications: raw
                .fetch_classifications
                .unwrap_or(defaults.fetch_classifications),
        }
    }

    /// Merge per-call options over these defaults.
    pub fn resolve(&self, options: &Options) -> ResolvedOptions {
        ResolvedOptions {
            limit: options.limit.unwrap_or(self.limit),
            content_categories: options.content_categories.clone(),
            points_tag: options.points_tag.unwrap_or(self.points_tag),
            points_type: options.points_type.unwrap_or(self.points_type),
            fetch_classifications: options
                .fetch_classifications
                .clone()
                .unwrap_or_else(|| self.fetch_classifications.clone()),
        }
    }
}

/// Per-call option bundle. Every field is optional; `None` falls back to
/// the configured default.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Allow-list restricting which categories are searched. `None` means
    /// no restriction.
    pub content_categories: Option<BTreeSet<String>>,
    /// Score per matching tag value.
    pub points_tag: Option<u64>,
    /// Bonus for a same-category candidate.
    pub points_type: Option<u64>,
    /// Classifications parameterizing the fetch-time tag filter.
    pub fetch_classifications: Option<Vec<String>>,
}

/// Options with every fallback applied; what the pipeline actually runs on.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub limit: usize,
    pub content_categories: Option<BTreeSet<String>>,
    pub points_tag: u64,
    pub points_type: u64,
    pub fetch_classifications: Vec<String>,
}

impl ResolvedOptions {
    /// Whether a category passes the allow-list (no list = every category).
    pub fn allows_category(&self, slug: &str) -> bool {
        match &self.content_categories {
            Some(allowed) => allowed.contains(slug),
            None => true,
        }
    }
}
