//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided aliases and for codes arriving on the redirect
//! path.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Alphabet generated codes are drawn from.
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shape of a user-supplied alias.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("Invalid regex pattern"));

/// Shape of any resolvable code, generated or aliased.
///
/// Wider than the alias rule: stored codes may be up to 64 characters.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,64}$").expect("Invalid regex pattern"));

/// Generates a random short code.
///
/// Draws [`GENERATED_CODE_LENGTH`] characters uniformly from `[a-zA-Z0-9]`
/// using the thread-local CSPRNG. Codes are unguessable-ish, not security
/// tokens; collision handling is the caller's concern.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, `_`, `-`
///
/// # Errors
///
/// Returns [`AppError::Validation`] with a field-level message on `code`.
pub fn validate_alias(code: &str) -> Result<(), AppError> {
    if !ALIAS_REGEX.is_match(code) {
        return Err(AppError::validation(
            "code",
            "Alias must be 3-32 chars [a-zA-Z0-9_-]",
        ));
    }

    Ok(())
}

/// Whether a path segment even looks like a stored code.
///
/// The redirect handler screens with this before touching storage.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
