//! # Core Type Definitions
//!
//! This module contains the shared types of the Sift search engine:
//! - The canonical catalog record (`CatalogItem`)
//! - Engine state and sort orders (`EngineState`, `SortOrder`)
//! - Facet option lists (`FacetOptions`)
//! - Error types (`SiftError`)
//!
//! ## Totality
//!
//! Every field of `CatalogItem` has a default and `EngineState` has no
//! invalid representation other than `page == 0`, which every producer
//! clamps away. Filtering, sorting and pagination therefore never fail;
//! `SiftError` only covers configuration and catalog loading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// CATALOG ITEM
// =============================================================================

/// A catalog record after normalization.
///
/// Produced by [`crate::normalize::normalize`]; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Lowercase, trimmed record kind (`post`, `recipe`, ...).
    pub kind: String,
    pub slug: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub image: String,
    /// List-valued facet used by the blog profile.
    pub tags: Vec<String>,
    /// List-valued facet used by the recipe profile.
    pub diets: Vec<String>,
    /// Scalar facet used by the blog profile.
    pub category: String,
    /// Scalar facet used by the recipe profile.
    pub method: String,
    /// Minutes to read or cook. `None` when missing or unparsable, never zero.
    pub time_min: Option<i64>,
    pub serves: String,
    pub difficulty: String,
    /// ISO-like date; compared lexically.
    pub published: String,
    /// Every string-valued raw meta field, keyed by its original name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl CatalogItem {
    /// Look up a text field by name.
    ///
    /// Known fields resolve to the canonical value; anything else falls back to
    /// the raw meta map, and finally to the empty string.
    #[must_use]
    pub fn text_field(&self, name: &str) -> &str {
        match name {
            "kind" => &self.kind,
            "slug" => &self.slug,
            "url" => &self.url,
            "title" => &self.title,
            "summary" => &self.summary,
            "image" => &self.image,
            "category" => &self.category,
            "method" => &self.method,
            "serves" => &self.serves,
            "difficulty" => &self.difficulty,
            "published" => &self.published,
            other => self.meta.get(other).map(String::as_str).unwrap_or(""),
        }
    }
}

// =============================================================================
// SORT ORDER
// =============================================================================

/// The fixed set of result orderings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Descending by recency field. The default.
    #[default]
    Newest,
    /// Ascending by `time_min`, missing values last.
    TimeAsc,
    /// Descending by `time_min`, missing values last.
    TimeDesc,
    /// Ascending by title.
    TitleAsc,
}

impl SortOrder {
    /// Every ordering, in display order.
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::TimeAsc,
        SortOrder::TimeDesc,
        SortOrder::TitleAsc,
    ];

    /// The URL parameter value for this ordering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::TimeAsc => "time_asc",
            Self::TimeDesc => "time_desc",
            Self::TitleAsc => "title_asc",
        }
    }

    /// Parse a URL parameter value. Unknown values yield `None`.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENGINE STATE
// =============================================================================

/// The mutable search state of one search widget.
///
/// Empty `facet_a`/`facet_b` mean "no selection". `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub query: String,
    pub facet_a: String,
    pub facet_b: String,
    pub sort: SortOrder,
    pub page: usize,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            query: String::new(),
            facet_a: String::new(),
            facet_b: String::new(),
            sort: SortOrder::Newest,
            page: 1,
        }
    }
}

impl EngineState {
    /// Create the default state (no filters, newest first, page 1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no filter or ordering differs from the default.
    ///
    /// The page is not considered.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.query.is_empty()
            || !self.facet_a.is_empty()
            || !self.facet_b.is_empty()
            || self.sort != SortOrder::Newest
    }
}

// =============================================================================
// FACET OPTIONS
// =============================================================================

/// Selectable values for both facets, derived from the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetOptions {
    pub facet_a: Vec<String>,
    pub facet_b: Vec<String>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in Sift.
///
/// The engine itself is total; these cover profile configuration and
/// catalog loading only.
#[derive(Debug, Error)]
pub enum SiftError {
    /// A profile failed validation.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// A profile file could not be parsed.
    #[error("Profile parse error: {0}")]
    ProfileParse(String),

    /// The catalog could not be fetched.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
