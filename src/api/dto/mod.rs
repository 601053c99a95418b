//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Entity types
//! whose fields already match the wire format serialize directly.

pub mod links;
pub mod meta;
pub mod stats;
