//! # Catalog Module
//!
//! The loaded, normalized item set plus its facet options.
//!
//! A catalog is built once per load and never mutated; callers share it as
//! `Arc<Catalog>`. Malformed input is not an error here: anything that is not
//! a JSON array of records is an empty catalog.

use crate::normalize::normalize;
use crate::{CatalogItem, FacetOptions, Profile, facets};
use serde_json::Value;

/// Parse catalog bytes into raw records.
///
/// Malformed JSON or a non-array top level yields no records.
#[must_use]
pub fn parse_records(bytes: &[u8]) -> Vec<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Array(records)) => records,
        _ => Vec::new(),
    }
}

/// Normalized catalog items and the facet options derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    facets: FacetOptions,
}

impl Catalog {
    /// A catalog with no items.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize records, apply the profile's kind filter, extract facets.
    #[must_use]
    pub fn from_records(records: &[Value], profile: &Profile) -> Self {
        let items: Vec<CatalogItem> = records
            .iter()
            .map(normalize)
            .filter(|item| profile.accepts(item))
            .collect();
        Self::from_items(items, profile)
    }

    /// Build a catalog from already-normalized items. No kind filter is applied.
    #[must_use]
    pub fn from_items(items: Vec<CatalogItem>, profile: &Profile) -> Self {
        let facets = facets::extract(&items, profile);
        Self { items, facets }
    }

    /// Parse, normalize and index catalog bytes.
    #[must_use]
    pub fn from_json_bytes(bytes: &[u8], profile: &Profile) -> Self {
        Self::from_records(&parse_records(bytes), profile)
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
