//! # Shorty
//!
//! A small URL-shortening service with click analytics, built with Axum and
//! SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random short codes with custom alias support
//! - Atomic click accounting (per-visit rows plus a maintained counter)
//! - Daily click series, top links, and per-link rollups
//! - CSRF protection for mutating endpoints via a stateless HMAC token
//! - CSV export of links and clicks
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional; everything has a local default
//! export DATABASE_URL="sqlite://data/shorty.db"
//! export LISTEN_ADDR="0.0.0.0:3000"
//!
//! # Start the service; schema is created on first run
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod security;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService, StatsService};
    pub use crate::domain::entities::{Click, Link, NewClick, NewLink};
    pub use crate::error::AppError;
    pub use crate::security::{HmacCsrfGuard, MutationGuard};
    pub use crate::state::AppState;
}
