//! Category and classification schema registry.
//!
//! The surrounding CMS declares, per content category, which classification
//! names exist on it; separately, each classification name has a behaviour
//! (free-form tags, fixed categories, or grouping). Only classifications
//! that behave like tags take part in related-content matching, so the
//! lookup is two-level: the category must declare the name AND the name must
//! behave like tags.
//!
//! The registry can be built programmatically or deserialized from TOML:
//!
//! ```toml
//! [classifications]
//! tags = "tags"
//! chapters = "grouping"
//!
//! [categories.book]
//! classifications = ["tags", "chapters"]
//!
//! [categories.article]
//! classifications = ["tags"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// How a classification behaves on the categories that declare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationKind {
    /// Free-form, multi-valued labels. The only kind used for matching.
    Tags,
    /// A fixed vocabulary of single-valued categories.
    Categories,
    /// Hierarchical grouping, one group per record.
    Grouping,
}

impl ClassificationKind {
    /// Whether this classification participates in tag matching.
    pub fn is_tag_like(self) -> bool {
        matches!(self, ClassificationKind::Tags)
    }
}

/// Schema descriptor for one content category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySchema {
    /// Category slug, e.g. "book".
    pub slug: String,
    /// Classification names this category declares, in declaration order.
    pub classifications: Vec<String>,
}

impl CategorySchema {
    /// Whether this category declares a classification by name.
    pub fn declares(&self, classification: &str) -> bool {
        self.classifications.iter().any(|c| c == classification)
    }
}

/// Raw registry as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
struct RawSchema {
    #[serde(default)]
    classifications: BTreeMap<String, ClassificationKind>,
    #[serde(default)]
    categories: BTreeMap<String, RawCategory>,
}

#[derive(Debug, Deserialize, Default)]
struct RawCategory {
    #[serde(default)]
    classifications: Vec<String>,
}

/// Static schema metadata for the whole site: every category, every
/// classification name, and each name's behaviour.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    kinds: BTreeMap<String, ClassificationKind>,
    categories: BTreeMap<String, CategorySchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a classification name and its behaviour.
    pub fn with_classification(mut self, name: &str, kind: ClassificationKind) -> Self {
        self.kinds.insert(name.to_string(), kind);
        self
    }

    /// Declare a category and the classification names it carries.
    pub fn with_category(mut self, slug: &str, classifications: &[&str]) -> Self {
        self.categories.insert(
            slug.to_string(),
            CategorySchema {
                slug: slug.to_string(),
                classifications: classifications.iter().map(|c| c.to_string()).collect(),
            },
        );
        self
    }

    /// Parse a registry from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let raw: RawSchema = toml::from_str(text)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a registry from a TOML file, falling back to an empty registry
    /// if the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Self::from_toml_str(&text).ok())
            .unwrap_or_default()
    }

    fn from_raw(raw: RawSchema) -> Self {
        let categories = raw
            .categories
            .into_iter()
            .map(|(slug, cat)| {
                let schema = CategorySchema {
                    slug: slug.clone(),
                    classifications: cat.classifications,
                };
                (slug, schema)
            })
            .collect();
        Self {
            kinds: raw.classifications,
            categories,
        }
    }

    /// Schema for one category, if declared.
    pub fn category(&self, slug: &str) -> Option<&CategorySchema> {
        self.categories.get(slug)
    }

    /// All declared categories, in slug order.
    pub fn categories(&self) -> impl Iterator<Item = &CategorySchema> {
        self.categories.values()
    }

    /// Whether `classification` is declared on `category` AND behaves like
    /// tags.
    pub fn is_tag_like(&self, category: &str, classification: &str) -> bool {
        let declared = self
            .category(category)
            .is_some_and(|schema| schema.declares(classification));
        declared
            && self
                .kinds
                .get(classification)
                .is_some_and(|kind| kind.is_tag_like())
    }
}
