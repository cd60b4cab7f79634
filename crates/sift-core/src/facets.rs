//! # Facet Extractor
//!
//! Derives the selectable values of each facet from the full catalog.
//!
//! Options are always computed against the whole dataset, never the filtered
//! subset, so a user can pivot from one selection to another freely.

use crate::profile::{FacetSpec, FacetValue};
use crate::{CatalogItem, FacetOptions, Profile};
use std::collections::BTreeSet;

/// Extract both facets' options for a profile.
#[must_use]
pub fn extract(items: &[CatalogItem], profile: &Profile) -> FacetOptions {
    FacetOptions {
        facet_a: options_for(items, &profile.facet_a),
        facet_b: options_for(items, &profile.facet_b),
    }
}

/// Unique, non-empty values of one facet, sorted lexicographically.
#[must_use]
pub fn options_for(items: &[CatalogItem], spec: &FacetSpec) -> Vec<String> {
    let mut values: BTreeSet<&str> = BTreeSet::new();
    for item in items {
        match spec.field.read(item) {
            FacetValue::List(list) => values.extend(list.iter().map(String::as_str)),
            FacetValue::Scalar(value) => {
                values.insert(value);
            }
        }
    }
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
