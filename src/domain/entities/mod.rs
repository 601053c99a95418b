//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the
//! core concepts of the URL shortening service. Entities are plain data
//! structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping with its denormalized click counter
//! - [`Click`] - A click event recorded on a shortened link
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewLink`, `NewClick` - For creating new records
//! - `LinkPatch` - For partial updates

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, LinkPatch, NewLink};
