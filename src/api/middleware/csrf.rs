//! CSRF enforcement middleware for mutating endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Requires a valid anti-forgery token on non-read requests.
///
/// # Header Format
///
/// ```text
/// X-CSRF-Token: <token from GET /csrf>
/// Cookie: sid=<session id>
/// ```
///
/// Safe methods (GET, HEAD, OPTIONS) pass through untouched; everything
/// else is checked against the injected [`crate::security::MutationGuard`]
/// before the handler runs, so a rejected mutation never touches storage.
///
/// # Errors
///
/// Returns `403 Forbidden` if the session cookie or token header is
/// missing, or if the token does not match the session.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::api::middleware::csrf;
///
/// let guarded = Router::new()
///     .route("/links", post(create_link_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), csrf::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.method().is_safe() {
        st.mutation_guard.authorize(req.headers()).await?;
    }

    Ok(next.run(req).await)
}
