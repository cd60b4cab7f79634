//! # sift-core
//!
//! The faceted search engine for Sift - THE LOGIC.
//!
//! This crate turns a flat JSON catalog of content items (blog posts,
//! recipes, anything with a title and a few facet fields) into a searchable,
//! filterable, sortable and paginated list whose whole state lives in a URL
//! query string.
//!
//! ## Pipeline
//!
//! ```text
//! catalog bytes → normalize → Catalog (items + facet options)
//! query string  → codec::decode → EngineState
//! (Catalog, EngineState) → engine::run → paginate → Renderer + Location
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network, no logging dependency
//! - Total: malformed catalogs and tampered URLs degrade, they never fail
//! - Deterministic: stable sorts and sorted facet options
//! - Headless: drawing and URL writes are injected capabilities

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod codec;
pub mod controller;
pub mod diagnostics;
pub mod engine;
pub mod facets;
pub mod normalize;
pub mod paginate;
pub mod primitives;
pub mod profile;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CatalogItem, EngineState, FacetOptions, SiftError, SortOrder};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{Catalog, parse_records};
pub use controller::{CatalogStatus, Controller, Location, MemoryLocation, Renderer};
pub use diagnostics::{Diagnostic, DiagnosticKind, check_records};
pub use normalize::normalize;
pub use paginate::{Page, PageSummary, paginate, total_pages};
pub use profile::{FacetField, FacetSpec, FacetValue, Profile};
