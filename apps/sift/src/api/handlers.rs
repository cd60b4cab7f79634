//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! The catalog is shared read-only; every search request runs on its own
//! short-lived controller, so no handler takes a lock.

use super::{
    AppState,
    types::{FacetsResponse, HealthResponse, SearchResponse, StatusResponse},
};
use crate::render::JsonRenderer;
use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use sift_core::{CatalogStatus, Controller, MemoryLocation};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get catalog status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let message = match &state.status {
        CatalogStatus::Unavailable(reason) => Some(reason.clone()),
        _ => None,
    };

    let response = StatusResponse {
        profile: state.profile.name.clone(),
        available: state.status == CatalogStatus::Ready,
        item_count: state.catalog.len(),
        page_size: state.profile.page_size,
        message,
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// FACETS HANDLER
// =============================================================================

/// Get facet options for the whole catalog.
pub async fn facets_handler(State(state): State<AppState>) -> impl IntoResponse {
    let keys = (
        state.profile.facet_a.key.as_str(),
        state.profile.facet_b.key.as_str(),
    );
    (
        StatusCode::OK,
        Json(FacetsResponse::new(keys, state.catalog.facets())),
    )
}

// =============================================================================
// SEARCH HANDLER
// =============================================================================

/// Run a search described by the request's query string.
///
/// Accepts the same query string the search page would carry in its URL.
/// Tampered or unknown parameters fall back to defaults; this never fails.
pub async fn search_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let query = query.unwrap_or_default();
    let mut controller = Controller::new(
        (*state.profile).clone(),
        JsonRenderer::new(),
        MemoryLocation::new(),
        &query,
    );

    match &state.status {
        CatalogStatus::Ready => controller.load(state.catalog.clone()),
        CatalogStatus::Unavailable(reason) => controller.load_failed(reason.clone()),
        CatalogStatus::Pending => controller.refresh(),
    }

    let response = SearchResponse::from_controller(controller);
    tracing::debug!(
        "search '{}' -> {} result(s), page {}/{}",
        query,
        response.summary.total,
        response.summary.page,
        response.summary.total_pages
    );

    (StatusCode::OK, Json(response))
}
