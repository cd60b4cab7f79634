//! # Engine Primitives
//!
//! Fixed constants shared by the codec, the engine and the paginator.
//!
//! These are compiled into the binary. Profiles may override the page size,
//! but the URL keys for query, sort and page are fixed for every profile.

/// Default number of results per page.
pub const PAGE_SIZE: usize = 6;

/// URL key for the free-text query.
pub const QUERY_KEY: &str = "q";

/// URL key for the sort order.
pub const SORT_KEY: &str = "sort";

/// URL key for the 1-based page number.
pub const PAGE_KEY: &str = "page";

/// Keys a profile may not claim for one of its facets.
pub const RESERVED_KEYS: [&str; 3] = [QUERY_KEY, SORT_KEY, PAGE_KEY];

/// Default location of the catalog file, relative to the search page.
pub const DEFAULT_CATALOG_PATH: &str = "search-index.json";

/// Field used by the `newest` ordering unless a profile names another one.
pub const DEFAULT_RECENCY_FIELD: &str = "published";

/// Upper bound accepted by catalog diagnostics for `time-min`.
///
/// The normalizer itself is lenient; only `check_records` enforces this.
pub const MAX_TIME_MIN: i64 = 1_000_000;

/// Message handed to renderers while no catalog is available.
pub const UNAVAILABLE_MESSAGE: &str = "Search index is unavailable.";
