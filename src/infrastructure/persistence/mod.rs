//! SQLite repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with
//! runtime-bound prepared statements. The schema is created idempotently at
//! startup (see [`db::init_schema`]); no migration toolchain is involved.
//!
//! # Modules
//!
//! - [`db`] - Pool construction and schema setup
//! - [`SqliteLinkRepository`] - Link storage and retrieval
//! - [`SqliteStatsRepository`] - Click recording and analytics queries

pub mod db;
pub mod sqlite_link_repository;
pub mod sqlite_stats_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_stats_repository::SqliteStatsRepository;
