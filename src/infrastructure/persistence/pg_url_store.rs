//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use crate::domain::repositories::{StoreError, UrlStore};
use crate::utils::db_error::is_unique_violation_on_alias;

/// PostgreSQL store for alias bindings.
///
/// `save` is a single `INSERT ... RETURNING id`; the `short_links_alias_key`
/// unique constraint makes concurrent claims on the same alias resolve to one
/// success and unique violations for the rest.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StoreError> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO short_links (alias, url)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(alias)
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(e) if is_unique_violation_on_alias(&e) => {
                Err(StoreError::AliasExists(alias.to_string()))
            }
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM short_links WHERE alias = $1")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                error!("Database health check failed: {}", e);
                false
            }
        }
    }
}
