//! HTTP middleware for request processing and protection.
//!
//! Provides CSRF enforcement and observability middleware.

pub mod csrf;
pub mod tracing;
