//! DTOs for the service identity and CSRF endpoints.

use serde::Serialize;

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub ok: bool,
    pub service: &'static str,
}

/// Response body for `GET /csrf`.
#[derive(Debug, Serialize)]
pub struct CsrfTokenResponse {
    pub token: String,
}
