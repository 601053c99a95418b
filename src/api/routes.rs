//! API route configuration.
//!
//! Mutating endpoints require a CSRF token via
//! [`crate::api::middleware::csrf`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_stats_handler,
    list_links_handler, overview_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes, guarded against cross-site request forgery.
///
/// # Endpoints
///
/// - `GET    /links`       - List/search links
/// - `POST   /links`       - Create a link
/// - `GET    /links/{id}`  - Fetch one link
/// - `PUT    /links/{id}`  - Partially update a link
/// - `DELETE /links/{id}`  - Delete a link and its clicks
///
/// The CSRF layer is attached by the caller so reads and writes share one
/// route table; safe methods pass the guard untouched.
pub fn managed_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}

/// Read-only statistics routes.
///
/// # Endpoints
///
/// - `GET /stats`       - Global rollup
/// - `GET /stats/{id}`  - Per-link rollup
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(overview_handler))
        .route("/stats/{id}", get(link_stats_handler))
}
