//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState, FacetsResponse, SearchResponse};
use crate::render::{JsonRenderer, TextRenderer};
use crate::source::CatalogSource;
use sift_core::{
    Catalog, Controller, Location, MemoryLocation, Profile, Renderer, SiftError, SortOrder,
    check_records,
};
use std::sync::Arc;

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Search inputs: a URL to seed from, then explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub url: String,
    pub query: Option<String>,
    pub facet_a: Option<String>,
    pub facet_b: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
}

/// Print one page of results.
///
/// A catalog that cannot be loaded is rendered as the unavailable state,
/// the same way the search page shows it; it is not an error.
pub async fn cmd_search(
    source: &CatalogSource,
    profile: Profile,
    args: &SearchArgs,
    json_mode: bool,
    verbose: bool,
) -> Result<(), SiftError> {
    let catalog = source.load(&profile).await;

    if json_mode {
        let mut controller = Controller::new(
            profile,
            JsonRenderer::new(),
            MemoryLocation::new(),
            &args.url,
        );
        settle(&mut controller, catalog);
        apply(&mut controller, args);

        let output = SearchResponse::from_controller(controller);
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    let renderer = TextRenderer::new(&profile);
    let mut controller = Controller::new(profile, renderer, MemoryLocation::new(), &args.url);
    settle(&mut controller, catalog);
    apply(&mut controller, args);

    if verbose {
        let state = controller.state();
        println!(
            "State: query={:?} {}={:?} {}={:?} sort={} page={}",
            state.query,
            controller.profile().facet_a.key,
            state.facet_a,
            controller.profile().facet_b.key,
            state.facet_b,
            state.sort,
            state.page
        );
        println!();
    }

    print!("{}", controller.renderer().output());
    if !controller.location().query().is_empty() {
        println!("URL: ?{}", controller.location().query());
    }
    Ok(())
}

/// Hand the load outcome to the controller.
fn settle<R: Renderer, L: Location>(
    controller: &mut Controller<R, L>,
    catalog: Result<Catalog, SiftError>,
) {
    match catalog {
        Ok(catalog) => controller.load(Arc::new(catalog)),
        Err(e) => {
            tracing::warn!("{}", e);
            controller.load_failed(e.to_string());
        }
    }
}

/// Apply explicit overrides in the order a user would: filters, then page.
fn apply<R: Renderer, L: Location>(controller: &mut Controller<R, L>, args: &SearchArgs) {
    if let Some(query) = &args.query {
        controller.set_query(query);
    }
    if let Some(value) = &args.facet_a {
        controller.set_facet_a(value);
    }
    if let Some(value) = &args.facet_b {
        controller.set_facet_b(value);
    }
    if let Some(sort) = args.sort {
        controller.set_sort(sort);
    }
    if let Some(page) = args.page {
        controller.go_to_page(page);
    }
}

// =============================================================================
// FACETS COMMAND
// =============================================================================

/// Print facet options for the whole catalog.
pub async fn cmd_facets(
    source: &CatalogSource,
    profile: &Profile,
    json_mode: bool,
) -> Result<(), SiftError> {
    let catalog = source.load(profile).await?;
    let keys = (profile.facet_a.key.as_str(), profile.facet_b.key.as_str());
    let response = FacetsResponse::new(keys, catalog.facets());

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Sift Facets ({})", profile.name);
    println!("===========");
    for list in [&response.facet_a, &response.facet_b] {
        println!();
        println!("{} ({}):", list.key, list.options.len());
        for option in &list.options {
            println!("  {}", option);
        }
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report authoring problems in the catalog.
///
/// Findings are warnings; only an unloadable catalog is an error.
pub async fn cmd_check(source: &CatalogSource, json_mode: bool) -> Result<(), SiftError> {
    let records = source.records().await?;
    let diagnostics = check_records(&records);

    if json_mode {
        let output = serde_json::json!({
            "catalog": source.to_string(),
            "records": records.len(),
            "issues": diagnostics,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    for diagnostic in &diagnostics {
        tracing::warn!("{}", diagnostic);
    }

    println!("Sift Catalog Check");
    println!("==================");
    println!("Catalog: {}", source);
    println!("Records: {}", records.len());
    println!("Issues:  {}", diagnostics.len());

    Ok(())
}

// =============================================================================
// PROFILE COMMAND
// =============================================================================

/// Print the effective profile.
pub fn cmd_profile(profile: &Profile, json_mode: bool) -> Result<(), SiftError> {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(profile).unwrap_or_default()
        );
        return Ok(());
    }

    print!("{}", profile.to_toml_string()?);
    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
///
/// The server starts even when the catalog cannot be loaded; searches then
/// report the unavailable state.
pub async fn cmd_serve(
    source: &CatalogSource,
    profile: Profile,
    host: &str,
    port: u16,
) -> Result<(), SiftError> {
    let state = match source.load(&profile).await {
        Ok(catalog) => AppState::new(profile, catalog),
        Err(e) => {
            tracing::error!("{}", e);
            AppState::unavailable(profile, e.to_string())
        }
    };

    println!("Sift Search Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:    {}", host);
    println!("  Port:    {}", port);
    println!("  Profile: {}", state.profile.name);
    println!("  Catalog: {} ({} items)", source, state.catalog.len());
    println!();
    println!("Endpoints:");
    println!("  GET /search - One page of results (takes the page's query string)");
    println!("  GET /facets - Facet options");
    println!("  GET /status - Catalog status");
    println!("  GET /health - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state).await
}
