//! Anti-forgery capability for mutating requests.
//!
//! The core never sees session mechanics; it only asks an injected
//! [`MutationGuard`] whether a mutation is authorized. The default
//! implementation is stateless: a random session id lives in an HttpOnly
//! cookie and the token is an HMAC over it, so there is nothing to store
//! server-side and nothing to expire.

use async_trait::async_trait;
use axum::http::{header::COOKIE, HeaderMap};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie the token is bound to.
pub const SESSION_COOKIE: &str = "sid";

/// Header mutating requests present their token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// A token handed out to a client, plus the cookie that pins it to the
/// session when one had to be minted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// `Set-Cookie` value when a fresh session id was created; `None` when
    /// the caller already had one.
    pub set_cookie: Option<String>,
}

/// Capability check gating all mutating operations.
///
/// Issued tokens are scoped to the caller's session; `authorize` must only
/// pass when the presented token matches that session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MutationGuard: Send + Sync {
    /// Issues a token for the caller's session, creating the session when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if token material cannot be produced.
    async fn issue(&self, headers: &HeaderMap) -> Result<IssuedToken, AppError>;

    /// Verifies the capability token presented by a mutating request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when the token is missing or does not
    /// match the caller's session.
    async fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError>;
}

/// Stateless HMAC-SHA256 implementation of [`MutationGuard`].
///
/// `token = hex(HMAC(secret, session_id))`. Verification recomputes the MAC
/// and compares in constant time. With an ephemeral secret, tokens stop
/// working across restarts; clients just fetch a fresh one.
pub struct HmacCsrfGuard {
    secret: Vec<u8>,
}

impl HmacCsrfGuard {
    /// Creates a guard keyed by `secret`.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Creates a guard with a random per-process secret.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    pub fn ephemeral() -> Self {
        let mut secret = [0u8; 32];
        getrandom::fill(&mut secret).expect("Failed to generate random bytes");
        Self::new(secret.to_vec())
    }

    fn token_for(&self, sid: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(sid.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn verify(&self, sid: &str, token: &str) -> bool {
        let Ok(raw) = hex::decode(token) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(sid.as_bytes());
        mac.verify_slice(&raw).is_ok()
    }
}

#[async_trait]
impl MutationGuard for HmacCsrfGuard {
    async fn issue(&self, headers: &HeaderMap) -> Result<IssuedToken, AppError> {
        if let Some(sid) = cookie_value(headers, SESSION_COOKIE).filter(|s| !s.is_empty()) {
            return Ok(IssuedToken {
                token: self.token_for(&sid),
                set_cookie: None,
            });
        }

        let mut raw = [0u8; 16];
        getrandom::fill(&mut raw)
            .map_err(|e| AppError::internal(format!("session id generation failed: {e}")))?;
        let sid = hex::encode(raw);

        Ok(IssuedToken {
            token: self.token_for(&sid),
            set_cookie: Some(format!(
                "{SESSION_COOKIE}={sid}; Path=/; HttpOnly; SameSite=Lax"
            )),
        })
    }

    async fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let rejected = || AppError::forbidden("Invalid CSRF token");

        let sid = cookie_value(headers, SESSION_COOKIE)
            .filter(|s| !s.is_empty())
            .ok_or_else(rejected)?;

        let token = headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(rejected)?;

        if !self.verify(&sid, token) {
            tracing::warn!("rejected mutation with bad anti-forgery token");
            return Err(rejected());
        }

        Ok(())
    }
}

/// Extracts a single cookie value from the `Cookie` header.
///
/// Handles multiple cookies by splitting on semicolons and matching the key.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value.to_string()),
            _ => None,
        }
    })
}
