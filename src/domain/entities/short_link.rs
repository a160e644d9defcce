//! Short link entity representing an alias bound to a URL.

use serde::Serialize;

/// A persisted binding between an alias and its target URL.
///
/// Created exactly once by a successful store `save` and never mutated afterwards.
/// The `alias` is unique across the whole store and acts as the primary key;
/// `id` is assigned by the store and is only used for logging and auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: i64, alias: String, url: String) -> Self {
        Self { id, alias, url }
    }
}

/// Outcome of a successful alias assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub alias: String,
    pub id: i64,
}

impl Assignment {
    pub fn new(alias: impl Into<String>, id: i64) -> Self {
        Self {
            alias: alias.into(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let link = ShortLink::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.alias, "abc123");
        assert_eq!(link.url, "https://example.com");
    }

    #[test]
    fn test_assignment_serializes_alias_and_id() {
        let assignment = Assignment::new("mylink", 42);

        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(json["alias"], "mylink");
        assert_eq!(json["id"], 42);
    }
}
