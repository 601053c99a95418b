//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /`                 - Service identity (public)
//! - `GET /csrf`             - Anti-forgery token issuance (public)
//! - `GET /go/{code}`        - Short link redirect (public)
//! - `/links*`               - Link management (CSRF token on writes)
//! - `/stats*`               - Statistics rollups (read-only)
//! - `/export/*`             - CSV dumps (read-only)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CSRF enforcement** - Mutating link routes only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    csrf_token_handler, export_clicks_handler, export_links_handler, not_found_handler,
    redirect_handler, service_info_handler,
};
use crate::api::middleware::{csrf, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Shared `state` is injected into every handler; the CSRF layer wraps only
/// the link management routes, so an unmatched path stays a plain 404 even
/// for mutating methods.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let managed = api::routes::managed_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), csrf::layer));

    let router = Router::new()
        .route("/", get(service_info_handler))
        .route("/csrf", get(csrf_token_handler))
        .route("/go/{code}", get(redirect_handler))
        .route("/export/links", get(export_links_handler))
        .route("/export/clicks", get(export_clicks_handler))
        .merge(managed)
        .merge(api::routes::stats_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
