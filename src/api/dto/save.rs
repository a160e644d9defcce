//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to bind a URL to an alias.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The URL to shorten.
    #[validate(
        url(message = "Invalid URL format"),
        custom(function = "reject_control_chars", message = "URL must not contain control characters")
    )]
    pub url: String,

    /// Optional alias. Absent or empty means "generate one".
    #[serde(default)]
    pub alias: Option<String>,
}

/// Rejects ASCII control characters, which URL parsing strips silently but a
/// `Location` header cannot carry.
fn reject_control_chars(url: &str) -> Result<(), ValidationError> {
    if url.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::new("control_characters"));
    }

    Ok(())
}

/// Successful save response.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub alias: String,
}

impl SaveResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: "OK",
            alias,
        }
    }
}
