//! In-memory implementation of the URL store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{StoreError, UrlStore};

/// In-process store backed by a sharded concurrent map.
///
/// `save` claims the alias through the map's entry API, which holds the shard
/// lock for the whole check-and-insert, so concurrent saves on the same alias
/// cannot both succeed. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUrlStore {
    links: DashMap<String, ShortLink>,
    last_id: AtomicI64,
}

impl MemoryUrlStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryUrlStore (links are not persisted)");
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StoreError> {
        match self.links.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AliasExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(ShortLink::new(id, alias.to_string(), url.to_string()));
                Ok(id)
            }
        }
    }

    async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        self.links
            .get(alias)
            .map(|link| link.url.clone())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
