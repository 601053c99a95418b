//! Handlers for service identity, CSRF token issuance, and the
//! unmatched-path fallback.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::api::dto::meta::{CsrfTokenResponse, ServiceInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the service identity payload.
///
/// # Endpoint
///
/// `GET /`
pub async fn service_info_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        ok: true,
        service: "Shorty API",
    })
}

/// Issues an anti-forgery token for the caller's session.
///
/// # Endpoint
///
/// `GET /csrf`
///
/// On a caller's first visit a session cookie is minted and attached via
/// `Set-Cookie`; repeat calls within the same session return the same token
/// without touching the cookie. Mutating endpoints require this token in
/// the `X-CSRF-Token` header.
///
/// # Errors
///
/// Returns 500 if token issuance fails.
pub async fn csrf_token_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let issued = state.mutation_guard.issue(&headers).await?;

    let mut response = Json(CsrfTokenResponse {
        token: issued.token,
    })
    .into_response();

    if let Some(cookie) = issued.set_cookie {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("session cookie not encodable: {e}")))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}

/// JSON 404 for paths outside the route table.
pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
