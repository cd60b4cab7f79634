//! # Profile Module
//!
//! A `Profile` turns the generic engine into one content-type search:
//! which URL keys name the two facets, which item fields back them, whether
//! only one record kind is kept, and which field orders `newest`.
//!
//! Two profiles are built in (`blog` and `recipes`); others load from TOML:
//!
//! ```toml
//! name = "blog"
//! kind = "post"
//! page_size = 6
//! recency_field = "published"
//! noun = "post"
//!
//! [facet_a]
//! key = "tag"
//! field = "tags"
//!
//! [facet_b]
//! key = "category"
//! field = "category"
//! ```

use crate::primitives::{DEFAULT_RECENCY_FIELD, PAGE_SIZE, RESERVED_KEYS};
use crate::{CatalogItem, SiftError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// =============================================================================
// FACET FIELDS
// =============================================================================

/// The item field backing a facet.
///
/// `Tags` and `Diets` are list-valued; everything else is scalar.
/// `Meta(key)` reads a raw meta field by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FacetField {
    Tags,
    Diets,
    Category,
    Method,
    Difficulty,
    Serves,
    Meta(String),
}

/// A facet field's value on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetValue<'a> {
    List(&'a [String]),
    Scalar(&'a str),
}

impl FacetField {
    /// True for list-membership facets.
    #[must_use]
    pub fn is_list_valued(&self) -> bool {
        matches!(self, Self::Tags | Self::Diets)
    }

    /// Read this field from an item.
    #[must_use]
    pub fn read<'a>(&self, item: &'a CatalogItem) -> FacetValue<'a> {
        match self {
            Self::Tags => FacetValue::List(&item.tags),
            Self::Diets => FacetValue::List(&item.diets),
            Self::Category => FacetValue::Scalar(&item.category),
            Self::Method => FacetValue::Scalar(&item.method),
            Self::Difficulty => FacetValue::Scalar(&item.difficulty),
            Self::Serves => FacetValue::Scalar(&item.serves),
            Self::Meta(key) => FacetValue::Scalar(item.text_field(key)),
        }
    }
}

impl TryFrom<String> for FacetField {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "tags" => Ok(Self::Tags),
            "diets" => Ok(Self::Diets),
            "category" => Ok(Self::Category),
            "method" => Ok(Self::Method),
            "difficulty" => Ok(Self::Difficulty),
            "serves" => Ok(Self::Serves),
            other => match other.strip_prefix("meta:") {
                Some(key) if !key.is_empty() => Ok(Self::Meta(key.to_string())),
                _ => Err(format!("unknown facet field '{}'", other)),
            },
        }
    }
}

impl From<FacetField> for String {
    fn from(field: FacetField) -> Self {
        field.to_string()
    }
}

impl fmt::Display for FacetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags => f.write_str("tags"),
            Self::Diets => f.write_str("diets"),
            Self::Category => f.write_str("category"),
            Self::Method => f.write_str("method"),
            Self::Difficulty => f.write_str("difficulty"),
            Self::Serves => f.write_str("serves"),
            Self::Meta(key) => write!(f, "meta:{}", key),
        }
    }
}

/// A facet: the URL key it is addressed by and the field behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub key: String,
    pub field: FacetField,
}

impl FacetSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, field: FacetField) -> Self {
        Self {
            key: key.into(),
            field,
        }
    }

    #[must_use]
    pub fn is_list_valued(&self) -> bool {
        self.field.is_list_valued()
    }
}

// =============================================================================
// PROFILE
// =============================================================================

fn default_page_size() -> usize {
    PAGE_SIZE
}

fn default_recency_field() -> String {
    DEFAULT_RECENCY_FIELD.to_string()
}

fn default_noun() -> String {
    "result".to_string()
}

/// Configuration of one search instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Keep only records of this kind. `None` keeps every record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Field compared by the `newest` ordering.
    #[serde(default = "default_recency_field")]
    pub recency_field: String,
    /// Singular noun used in result summaries ("post", "recipe").
    #[serde(default = "default_noun")]
    pub noun: String,
    pub facet_a: FacetSpec,
    pub facet_b: FacetSpec,
}

impl Profile {
    /// Blog posts: `tag` over tags, `category` over category, posts only.
    #[must_use]
    pub fn blog() -> Self {
        Self {
            name: "blog".to_string(),
            kind: Some("post".to_string()),
            page_size: PAGE_SIZE,
            recency_field: default_recency_field(),
            noun: "post".to_string(),
            facet_a: FacetSpec::new("tag", FacetField::Tags),
            facet_b: FacetSpec::new("category", FacetField::Category),
        }
    }

    /// Recipes: `diet` over diets, `method` over method, every kind.
    #[must_use]
    pub fn recipes() -> Self {
        Self {
            name: "recipes".to_string(),
            kind: None,
            page_size: PAGE_SIZE,
            recency_field: default_recency_field(),
            noun: "recipe".to_string(),
            facet_a: FacetSpec::new("diet", FacetField::Diets),
            facet_b: FacetSpec::new("method", FacetField::Method),
        }
    }

    /// Look up a built-in profile by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "blog" => Some(Self::blog()),
            "recipes" => Some(Self::recipes()),
            _ => None,
        }
    }

    /// Parse and validate a TOML profile.
    pub fn from_toml_str(content: &str) -> Result<Self, SiftError> {
        let profile: Self =
            toml::from_str(content).map_err(|e| SiftError::ProfileParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a TOML profile file.
    pub fn load(path: &Path) -> Result<Self, SiftError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SiftError::IoError(format!("Cannot read profile '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize as TOML.
    pub fn to_toml_string(&self) -> Result<String, SiftError> {
        toml::to_string(self).map_err(|e| SiftError::ProfileParse(e.to_string()))
    }

    /// Check the invariants the codec and engine rely on.
    pub fn validate(&self) -> Result<(), SiftError> {
        for spec in self.facets() {
            if spec.key.is_empty() {
                return Err(SiftError::InvalidProfile(
                    "facet key must not be empty".to_string(),
                ));
            }
            if RESERVED_KEYS.contains(&spec.key.as_str()) {
                return Err(SiftError::InvalidProfile(format!(
                    "facet key '{}' is reserved",
                    spec.key
                )));
            }
        }
        if self.facet_a.key == self.facet_b.key {
            return Err(SiftError::InvalidProfile(format!(
                "facet keys must differ, both are '{}'",
                self.facet_a.key
            )));
        }
        if self.page_size == 0 {
            return Err(SiftError::InvalidProfile(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.recency_field.is_empty() {
            return Err(SiftError::InvalidProfile(
                "recency_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Both facets, A first.
    #[must_use]
    pub fn facets(&self) -> [&FacetSpec; 2] {
        [&self.facet_a, &self.facet_b]
    }

    /// True when the profile's kind filter keeps this item.
    #[must_use]
    pub fn accepts(&self, item: &CatalogItem) -> bool {
        self.kind
            .as_deref()
            .is_none_or(|kind| item.kind == kind.trim().to_lowercase())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::blog()
    }
}

// =============================================================================
// TESTS
// =============================================================================
