//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use crate::render::JsonRenderer;
use serde::{Deserialize, Serialize};
use sift_core::{CatalogItem, Controller, EngineState, FacetOptions, MemoryLocation, PageSummary};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Catalog status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub profile: String,
    pub available: bool,
    pub item_count: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// FACETS RESPONSE
// =============================================================================

/// Facet options, keyed by their URL parameter names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub facet_a: FacetList,
    pub facet_b: FacetList,
}

/// One facet's URL key and its sorted options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetList {
    pub key: String,
    pub options: Vec<String>,
}

impl FacetsResponse {
    #[must_use]
    pub fn new(keys: (&str, &str), options: &FacetOptions) -> Self {
        Self {
            facet_a: FacetList {
                key: keys.0.to_string(),
                options: options.facet_a.clone(),
            },
            facet_b: FacetList {
                key: keys.1.to_string(),
                options: options.facet_b.clone(),
            },
        }
    }
}

// =============================================================================
// SEARCH RESPONSE
// =============================================================================

/// One rendered page of search results.
///
/// `state` is the clamped state actually shown and `url` its canonical
/// query string (empty for the default state).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub state: EngineState,
    pub url: String,
    pub summary: PageSummary,
    pub items: Vec<CatalogItem>,
}

impl SearchResponse {
    /// Build from a controller that has already rendered.
    #[must_use]
    pub fn from_controller(controller: Controller<JsonRenderer, MemoryLocation>) -> Self {
        let state = controller.state().clone();
        let url = controller.query_string();
        let (renderer, _) = controller.into_parts();
        let (items, summary, message) = renderer.into_page();

        Self {
            available: message.is_none(),
            message,
            state,
            url,
            summary,
            items,
        }
    }
}
