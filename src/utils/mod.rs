//! Utility functions for code generation and input validation.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_validator`] - Target URL validation

pub mod code_generator;
pub mod url_validator;

pub use code_generator::{generate_code, is_valid_code, validate_alias};
pub use url_validator::validate_target_url;
