//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::links::{
    CreateLinkRequest, DeletedResponse, ItemResponse, ListLinksQuery, ListResponse,
    UpdateLinkRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists links newest first, optionally filtered.
///
/// # Endpoint
///
/// `GET /links?q=<substring>`
///
/// The filter matches a substring of the code, URL, or title.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let items = state.link_service.list(query.q).await?;

    Ok(Json(ListResponse { items }))
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "title": "Example",   // optional
///   "code": "my-alias"    // optional; generated when absent or blank
/// }
/// ```
///
/// # Errors
///
/// Returns 422 with field-level messages on a bad URL or alias, or when the
/// alias is already taken. Returns 403 without a valid CSRF token.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let item = state
        .link_service
        .create(payload.url, payload.title, payload.code)
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

/// Fetches a single link by id.
///
/// # Endpoint
///
/// `GET /links/{id}`
///
/// # Errors
///
/// Returns 404 if no link has this id.
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = state.link_service.get(id).await?;

    Ok(Json(ItemResponse { item }))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PUT /links/{id}`
///
/// # Request Body
///
/// All fields optional; absent or `null` fields are left unchanged. An
/// empty `title` clears the stored title.
///
/// # Errors
///
/// Returns 400 when the body supplies nothing to change, 422 on a bad URL
/// or alias (including an alias another link already holds), 404 if the
/// link is absent, 403 without a valid CSRF token.
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = state
        .link_service
        .update(id, payload.url, payload.title, payload.code)
        .await?;

    Ok(Json(ItemResponse { item }))
}

/// Deletes a link and its click history.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// # Errors
///
/// Returns 404 if no link has this id, 403 without a valid CSRF token.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.link_service.delete(id).await?;

    Ok(Json(DeletedResponse { deleted: id }))
}
