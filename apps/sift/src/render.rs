//! # Renderers
//!
//! Output adapters for the core [`Controller`](sift_core::Controller).
//!
//! - [`TextRenderer`] draws plain-text result cards for the terminal
//! - [`JsonRenderer`] captures the page for JSON output and the HTTP API
//!
//! Each render replaces the previous output.

use sift_core::profile::FacetValue;
use sift_core::{CatalogItem, PageSummary, Profile, Renderer};
use std::fmt::Write;

// =============================================================================
// TEXT RENDERER
// =============================================================================

/// Plain-text cards followed by the page summary.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    profile: Profile,
    out: String,
}

impl TextRenderer {
    #[must_use]
    pub fn new(profile: &Profile) -> Self {
        Self {
            profile: profile.clone(),
            out: String::new(),
        }
    }

    /// The last rendered output.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.out
    }
}

impl Renderer for TextRenderer {
    fn render_page(&mut self, items: &[&CatalogItem], summary: &PageSummary) {
        self.out.clear();

        if items.is_empty() {
            self.out.push_str("No results match these filters.\n\n");
        }
        for item in items {
            self.out.push_str(&card(item, &self.profile));
            self.out.push('\n');
        }

        let _ = writeln!(self.out, "{}", summary_line(summary, &self.profile.noun));
        let _ = writeln!(self.out, "Page {} of {}", summary.page, summary.total_pages);
    }

    fn render_unavailable(&mut self, message: &str) {
        self.out.clear();
        let _ = writeln!(self.out, "{}", message);
    }
}

/// "Showing 1-6 of 8 posts".
#[must_use]
pub fn summary_line(summary: &PageSummary, noun: &str) -> String {
    format!(
        "Showing {}-{} of {} {}{}",
        summary.range_start,
        summary.range_end,
        summary.total,
        noun,
        if summary.total == 1 { "" } else { "s" }
    )
}

/// One result card.
///
/// ```text
/// 2024-08-01 · Cooking
/// Weeknight Pasta
/// Quick and cheap.
/// 25 min
/// [pasta] [quick]
/// /recipes/pasta.html
/// ```
#[must_use]
pub fn card(item: &CatalogItem, profile: &Profile) -> String {
    let mut header: Vec<&str> = Vec::new();
    if !item.published.is_empty() {
        header.push(item.published.as_str());
    }
    let mut chips: Vec<String> = Vec::new();
    for spec in profile.facets() {
        match spec.field.read(item) {
            FacetValue::Scalar(value) if !value.is_empty() => header.push(value),
            FacetValue::Scalar(_) => {}
            FacetValue::List(values) => chips.extend(values.iter().map(|v| format!("[{}]", v))),
        }
    }

    let mut out = String::new();
    if !header.is_empty() {
        let _ = writeln!(out, "{}", header.join(" · "));
    }
    let title = if item.title.is_empty() {
        "Untitled"
    } else {
        item.title.as_str()
    };
    let _ = writeln!(out, "{}", title);
    if !item.summary.is_empty() {
        let _ = writeln!(out, "{}", item.summary);
    }
    if let Some(minutes) = item.time_min {
        let _ = writeln!(out, "{} min", minutes);
    }
    if !chips.is_empty() {
        let _ = writeln!(out, "{}", chips.join(" "));
    }
    if !item.url.is_empty() {
        let _ = writeln!(out, "{}", item.url);
    }
    out
}

// =============================================================================
// JSON RENDERER
// =============================================================================

/// Captures the rendered page as owned data.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    items: Vec<CatalogItem>,
    summary: PageSummary,
    unavailable: Option<String>,
}

impl JsonRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn summary(&self) -> PageSummary {
        self.summary
    }

    /// The unavailable message, if the last render had no catalog.
    #[must_use]
    pub fn unavailable(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }

    /// Consume the renderer, returning items, summary and unavailable message.
    pub fn into_page(self) -> (Vec<CatalogItem>, PageSummary, Option<String>) {
        (self.items, self.summary, self.unavailable)
    }
}

impl Renderer for JsonRenderer {
    fn render_page(&mut self, items: &[&CatalogItem], summary: &PageSummary) {
        self.items = items.iter().map(|item| (*item).clone()).collect();
        self.summary = *summary;
        self.unavailable = None;
    }

    fn render_unavailable(&mut self, message: &str) {
        self.items.clear();
        self.summary = PageSummary {
            page: 1,
            total_pages: 1,
            ..PageSummary::default()
        };
        self.unavailable = Some(message.to_string());
    }
}

// =============================================================================
// TESTS
// =============================================================================
