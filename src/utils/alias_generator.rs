//! Alias generation and validation utilities.
//!
//! Generated aliases only need a low collision probability: collisions are
//! detected by the store and retried by
//! [`crate::application::services::AssignmentService`], not prevented here.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Case-sensitive letters and digits.
pub const DEFAULT_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Longest alias a caller may request.
pub const MAX_CUSTOM_ALIAS_LENGTH: usize = 64;

/// Aliases that would shadow fixed routes.
const RESERVED_ALIASES: &[&str] = &["health", "url"];

/// Source of alias candidates.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Produces a candidate of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Draws each character independently and uniformly from a fixed alphabet.
///
/// Uses the thread-local RNG; not intended to be cryptographically secure.
#[derive(Debug, Clone)]
pub struct RandomAliasGenerator {
    alphabet: Vec<u8>,
}

impl RandomAliasGenerator {
    /// Creates a generator over [`DEFAULT_ALPHABET`] (62 symbols).
    pub fn new() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_vec(),
        }
    }

    /// Creates a generator over a custom ASCII alphabet.
    ///
    /// Mostly useful for tests that need a tiny alias space.
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty or contains non-ASCII bytes.
    pub fn with_alphabet(alphabet: &[u8]) -> Self {
        assert!(!alphabet.is_empty(), "alphabet must not be empty");
        assert!(alphabet.is_ascii(), "alphabet must be ASCII");

        Self {
            alphabet: alphabet.to_vec(),
        }
    }

    /// Number of distinct aliases producible at `length`, saturating at `u128::MAX`.
    pub fn alias_space(&self, length: usize) -> u128 {
        let base = self.alphabet.len() as u128;
        (0..length).fold(1u128, |acc, _| acc.saturating_mul(base))
    }
}

impl Default for RandomAliasGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..self.alphabet.len());
                self.alphabet[idx] as char
            })
            .collect()
    }
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_CUSTOM_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
