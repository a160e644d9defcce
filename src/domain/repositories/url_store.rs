//! Storage contract for alias to URL bindings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a [`UrlStore`].
///
/// `AliasExists` and `NotFound` are expected outcomes that callers branch on;
/// `Backend` covers everything else (connection loss, constraint violations other
/// than alias uniqueness, driver errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("alias already exists: {0}")]
    AliasExists(String),

    #[error("alias not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistent store of alias bindings.
///
/// # Contract
///
/// - [`save`](Self::save) must claim the alias atomically: when several calls race on
///   the same alias, at most one succeeds and every other one reports
///   [`StoreError::AliasExists`]. A two-step "look up, then insert" implementation
///   does not satisfy this.
/// - [`resolve`](Self::resolve) reports a missing alias as [`StoreError::NotFound`],
///   never as [`StoreError::Backend`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL, unique constraint
/// - [`crate::infrastructure::persistence::MemoryUrlStore`] - in-process, sharded map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Binds `alias` to `url` and returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if the alias is already bound.
    /// Returns [`StoreError::Backend`] on any other failure.
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StoreError>;

    /// Returns the URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the alias was never bound.
    /// Returns [`StoreError::Backend`] on any other failure.
    async fn resolve(&self, alias: &str) -> Result<String, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
