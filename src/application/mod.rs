//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, and editing
//! - [`services::redirect_service::RedirectService`] - Redirect resolution with click recording
//! - [`services::stats_service::StatsService`] - Aggregated click statistics

pub mod services;
