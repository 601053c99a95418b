//! Target URL validation.
//!
//! Links may only point at `http`/`https` targets. The URL is stored exactly
//! as supplied (after trimming); no normalization happens here, so what the
//! user saves is what the redirect replays.

use crate::error::AppError;
use url::Url;

/// Validates a link's target URL.
///
/// # Rules
///
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https` (`javascript:`, `data:`, `ftp:` and
///   friends are rejected, as are scheme-less strings)
/// - Must have a host
///
/// # Errors
///
/// Returns [`AppError::Validation`] with a field-level message on `url`.
pub fn validate_target_url(input: &str) -> Result<(), AppError> {
    let invalid = || AppError::validation("url", "Invalid URL");

    let parsed = Url::parse(input).map_err(|_| invalid())?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(invalid()),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    Ok(())
}
