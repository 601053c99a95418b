//! Handler for the short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::application::services::ClickContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::is_valid_code;

/// Redirects a short code to its target URL, recording the click.
///
/// # Endpoint
///
/// `GET /go/{code}`
///
/// # Request Flow
///
/// 1. Screen the code shape; anything outside `[A-Za-z0-9_-]{3,64}` is not
///    found without a storage lookup
/// 2. Resolve the code to a link
/// 3. Record a click (atomic insert + counter increment) with the peer IP,
///    `User-Agent`, and `Referer` when present
/// 4. Respond `302` with `Location` and a plain-text fallback body
///
/// # Errors
///
/// Unknown or malformed codes get a plain-text 404 `Link not found`
/// (no JSON envelope; this endpoint talks to browsers, not the dashboard).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    if !is_valid_code(&code) {
        return not_found_response();
    }

    let ctx = ClickContext {
        ip: Some(addr.ip().to_string()),
        ua: header_value(&headers, header::USER_AGENT),
        referrer: header_value(&headers, header::REFERER),
    };

    match state.redirect_service.resolve_and_record(&code, ctx).await {
        Ok(url) => redirect_response(&url),
        Err(AppError::NotFound { .. }) => not_found_response(),
        Err(other) => other.into_response(),
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Explicit 302 + `Location`; framework redirect helpers pick other codes.
fn redirect_response(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => {
            let mut response =
                (StatusCode::FOUND, format!("Redirecting to {url}")).into_response();
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(e) => AppError::internal(format!("redirect target not encodable: {e}")).into_response(),
    }
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "Link not found").into_response()
}
