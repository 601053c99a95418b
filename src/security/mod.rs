//! Request authorization primitives.
//!
//! - [`csrf`] - Anti-forgery capability trait and its stateless HMAC
//!   implementation

pub mod csrf;

pub use csrf::{HmacCsrfGuard, IssuedToken, MutationGuard, CSRF_HEADER, SESSION_COOKIE};

#[cfg(test)]
pub use csrf::MockMutationGuard;
