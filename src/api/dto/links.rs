//! DTOs for the link management endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request body for `POST /links`.
///
/// `title` and `code` are optional; a blank `code` means "generate one".
/// A missing `url` defaults to empty and is rejected by validation with a
/// field-level message rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: String,
    pub title: Option<String>,
    pub code: Option<String>,
}

/// Request body for `PUT /links/{id}`.
///
/// All fields are optional; absent (or `null`) fields are left unchanged.
/// An empty `title` clears the stored title.
#[derive(Debug, Deserialize)]
pub struct UpdateLinkRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
}

/// Query string for `GET /links`.
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    pub q: Option<String>,
}

/// Response body for `GET /links`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<Link>,
}

/// Response wrapper for endpoints returning a single link.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: Link,
}

/// Response body for `DELETE /links/{id}`.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
}
