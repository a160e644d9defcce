//! Alias resolution for redirects.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::domain::repositories::{StoreError, UrlStore};

/// Why an alias could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No binding exists for the alias. Not a transient condition.
    #[error("short link not found: {0}")]
    NotFound(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

/// Service resolving aliases to their target URL.
pub struct RedirectService<S: UrlStore + ?Sized> {
    store: Arc<S>,
}

impl<S: UrlStore + ?Sized> RedirectService<S> {
    /// Creates a new redirect service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the URL bound to `alias` with a single store lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if the alias is unknown.
    /// Returns [`ResolveError::StorageFailure`] on any other store error.
    pub async fn resolve(&self, alias: &str) -> Result<String, ResolveError> {
        match self.store.resolve(alias).await {
            Ok(url) => {
                debug!(alias, url = %url, "alias resolved");
                Ok(url)
            }
            Err(StoreError::NotFound(_)) => {
                debug!(alias, "alias not found");
                Err(ResolveError::NotFound(alias.to_string()))
            }
            Err(e) => {
                error!(alias, error = %e, "failed to resolve alias");
                Err(ResolveError::StorageFailure(e.to_string()))
            }
        }
    }

    /// Reports whether the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }
}
