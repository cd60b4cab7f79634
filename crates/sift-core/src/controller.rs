//! # Controller Module
//!
//! Owns the state of one search widget and drives the pipeline.
//!
//! Every interaction runs to completion before returning:
//! engine → paginator → renderer → URL replace. There is no background work
//! and no shared mutable state; the catalog is shared read-only.
//!
//! Rendering and URL writes are capabilities injected as [`Renderer`] and
//! [`Location`], so the controller runs headless in tests and servers.

use crate::codec;
use crate::paginate::{PageSummary, paginate};
use crate::primitives::UNAVAILABLE_MESSAGE;
use crate::{Catalog, CatalogItem, EngineState, FacetOptions, Profile, SortOrder, engine};
use std::sync::Arc;

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Draws a page of results. Implementations own all output escaping.
pub trait Renderer {
    /// Draw the current page.
    fn render_page(&mut self, items: &[&CatalogItem], summary: &PageSummary);

    /// Draw the "index unavailable" state (no catalog, or loading failed).
    fn render_unavailable(&mut self, message: &str);
}

/// Receives the encoded state after every render.
///
/// Writes replace the current entry; they never add history.
pub trait Location {
    fn replace(&mut self, query: &str);
}

/// A `Location` that only remembers the last written query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    writes: usize,
}

impl MemoryLocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last query string written (empty for the default state).
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// How many replaces have happened.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Location for MemoryLocation {
    fn replace(&mut self, query: &str) {
        self.query = query.to_string();
        self.writes += 1;
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Whether the catalog has arrived.
///
/// Pending and unavailable look the same to the engine: zero items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Pending,
    Ready,
    Unavailable(String),
}

/// One search widget: profile, catalog, state and its two capabilities.
pub struct Controller<R: Renderer, L: Location> {
    profile: Profile,
    catalog: Arc<Catalog>,
    status: CatalogStatus,
    state: EngineState,
    summary: Option<PageSummary>,
    renderer: R,
    location: L,
}

impl<R: Renderer, L: Location> Controller<R, L> {
    /// Create a controller seeded from a URL query string. No catalog yet.
    pub fn new(profile: Profile, renderer: R, location: L, initial_query: &str) -> Self {
        let state = codec::decode(initial_query, &profile);
        Self {
            profile,
            catalog: Arc::new(Catalog::empty()),
            status: CatalogStatus::Pending,
            state,
            summary: None,
            renderer,
            location,
        }
    }

    /// Create a controller with its catalog already loaded, and render.
    pub fn with_catalog(
        profile: Profile,
        catalog: Arc<Catalog>,
        renderer: R,
        location: L,
        initial_query: &str,
    ) -> Self {
        let mut controller = Self::new(profile, renderer, location, initial_query);
        controller.load(catalog);
        controller
    }

    /// The catalog arrived: make it current and render.
    pub fn load(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        self.status = CatalogStatus::Ready;
        self.refresh();
    }

    /// The catalog could not be loaded. Renders the unavailable state;
    /// the URL is left untouched.
    pub fn load_failed(&mut self, reason: impl Into<String>) {
        self.catalog = Arc::new(Catalog::empty());
        self.status = CatalogStatus::Unavailable(reason.into());
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Set the free-text query (trimmed). Resets to page 1.
    pub fn set_query(&mut self, query: &str) {
        self.state.query = query.trim().to_string();
        self.restart();
    }

    /// Select a facet A value; empty clears it. Resets to page 1.
    pub fn set_facet_a(&mut self, value: &str) {
        self.state.facet_a = value.to_string();
        self.restart();
    }

    /// Select a facet B value; empty clears it. Resets to page 1.
    pub fn set_facet_b(&mut self, value: &str) {
        self.state.facet_b = value.to_string();
        self.restart();
    }

    /// Change the ordering. Resets to page 1.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.sort = sort;
        self.restart();
    }

    /// Reset query, facets and ordering to their defaults.
    pub fn clear_filters(&mut self) {
        self.state = EngineState::default();
        self.refresh();
    }

    /// Move forward one page if there is one.
    pub fn next_page(&mut self) {
        if self.summary.is_some_and(|s| s.has_next) {
            self.state.page += 1;
            self.refresh();
        }
    }

    /// Move back one page if there is one.
    pub fn prev_page(&mut self) {
        if self.state.page > 1 {
            self.state.page -= 1;
            self.refresh();
        }
    }

    /// Jump to a page; out-of-range values are clamped on refresh.
    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = page.max(1);
        self.refresh();
    }

    /// Recompute and redraw from the current state.
    pub fn refresh(&mut self) {
        if self.status != CatalogStatus::Ready {
            self.summary = None;
            let message = match &self.status {
                CatalogStatus::Unavailable(reason) => {
                    format!("{} ({})", UNAVAILABLE_MESSAGE, reason)
                }
                _ => UNAVAILABLE_MESSAGE.to_string(),
            };
            self.renderer.render_unavailable(&message);
            return;
        }

        let catalog = Arc::clone(&self.catalog);
        let results = engine::run(catalog.items(), &self.state, &self.profile);
        let page = paginate(&results, self.state.page, self.profile.page_size);

        self.state.page = page.summary.page;
        self.summary = Some(page.summary);
        self.renderer.render_page(page.items, &page.summary);
        self.location
            .replace(&codec::encode(&self.state, &self.profile));
    }

    fn restart(&mut self) {
        self.state.page = 1;
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Facet options of the loaded catalog; empty until it is ready.
    #[must_use]
    pub fn facet_options(&self) -> &FacetOptions {
        self.catalog.facets()
    }

    /// Summary of the last rendered page, if one was rendered.
    #[must_use]
    pub fn summary(&self) -> Option<PageSummary> {
        self.summary
    }

    /// The encoded current state.
    #[must_use]
    pub fn query_string(&self) -> String {
        codec::encode(&self.state, &self.profile)
    }

    /// The URL a replace would write, given the page's path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        codec::location_for(path, &self.query_string())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Give back the capabilities.
    pub fn into_parts(self) -> (R, L) {
        (self.renderer, self.location)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        pages: Vec<(Vec<String>, PageSummary)>,
        unavailable: Vec<String>,
    }

    impl Renderer for Recorder {
        fn render_page(&mut self, items: &[&CatalogItem], summary: &PageSummary) {
            let titles = items.iter().map(|i| i.title.clone()).collect();
            self.pages.push((titles, *summary));
        }

        fn render_unavailable(&mut self, message: &str) {
            self.unavailable.push(message.to_string());
        }
    }

    impl Recorder {
        fn last(&self) -> &(Vec<String>, PageSummary) {
            self.pages.last().expect("a page was rendered")
        }
    }

    fn catalog(count: usize) -> Arc<Catalog> {
        let items = (1..=count)
            .map(|i| CatalogItem {
                kind: "post".to_string(),
                title: format!("post {}", i),
                published: format!("2024-{:02}-01", i),
                tags: vec![if i % 2 == 0 { "even" } else { "odd" }.to_string()],
                ..CatalogItem::default()
            })
            .collect();
        Arc::new(Catalog::from_items(items, &Profile::blog()))
    }

    fn controller(query: &str) -> Controller<Recorder, MemoryLocation> {
        Controller::with_catalog(
            Profile::blog(),
            catalog(8),
            Recorder::default(),
            MemoryLocation::new(),
            query,
        )
    }

    #[test]
    fn pending_renders_unavailable_and_writes_nothing() {
        let mut c = Controller::new(
            Profile::blog(),
            Recorder::default(),
            MemoryLocation::new(),
            "?page=2",
        );
        c.refresh();
        assert_eq!(c.renderer().unavailable.len(), 1);
        assert!(c.renderer().pages.is_empty());
        assert_eq!(c.location().writes(), 0);
        assert_eq!(c.state().page, 2);
    }

    #[test]
    fn load_failure_is_not_fatal() {
        let mut c = Controller::new(
            Profile::blog(),
            Recorder::default(),
            MemoryLocation::new(),
            "",
        );
        c.load_failed("HTTP 404");
        assert_eq!(c.status(), &CatalogStatus::Unavailable("HTTP 404".to_string()));
        assert!(c.renderer().unavailable[0].contains("HTTP 404"));
        assert!(c.facet_options().facet_a.is_empty());
        assert_eq!(c.location().writes(), 0);
    }

    #[test]
    fn paging_forward_and_back() {
        let mut c = controller("");
        assert_eq!(c.renderer().last().0.len(), 6);
        assert_eq!(c.location().query(), "");

        c.next_page();
        assert_eq!(c.state().page, 2);
        assert_eq!(c.renderer().last().0, vec!["post 2", "post 1"]);
        assert_eq!(c.location().query(), "page=2");

        let renders = c.renderer().pages.len();
        c.next_page();
        assert_eq!(c.state().page, 2);
        assert_eq!(c.renderer().pages.len(), renders);

        c.prev_page();
        c.prev_page();
        assert_eq!(c.state().page, 1);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut c = controller("?page=2");
        assert_eq!(c.state().page, 2);

        c.set_facet_a("odd");
        assert_eq!(c.state().page, 1);
        assert_eq!(c.summary().map(|s| s.total), Some(4));
        assert_eq!(c.location().query(), "tag=odd");
    }

    #[test]
    fn tampered_page_is_clamped() {
        let c = controller("?page=99");
        assert_eq!(c.state().page, 2);
        assert_eq!(c.location().query(), "page=2");
    }

    #[test]
    fn query_is_trimmed() {
        let mut c = controller("");
        c.set_query("  post 3 ");
        assert_eq!(c.state().query, "post 3");
        assert_eq!(c.renderer().last().0, vec!["post 3"]);
    }

    #[test]
    fn clear_filters_restores_default_url() {
        let mut c = controller("?q=post&tag=even&sort=title_asc&page=2");
        c.clear_filters();
        assert_eq!(c.state(), &EngineState::default());
        assert_eq!(c.location().query(), "");
        assert_eq!(c.url("/blog/"), "/blog/");
    }

    #[test]
    fn facet_options_ignore_filters() {
        let mut c = controller("");
        let before = c.facet_options().clone();
        c.set_query("post 1");
        c.set_sort(SortOrder::TitleAsc);
        assert_eq!(c.facet_options(), &before);
        assert_eq!(before.facet_a, vec!["even", "odd"]);
    }
}
