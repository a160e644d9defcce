//! PostgreSQL store tests.
//!
//! Run with a database available:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test store_postgres -- --ignored
//! ```

use alias_shortener::domain::repositories::{StoreError, UrlStore};
use alias_shortener::infrastructure::persistence::PgUrlStore;
use sqlx::PgPool;
use std::sync::Arc;

fn store(pool: PgPool) -> PgUrlStore {
    PgUrlStore::new(Arc::new(pool))
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_save_and_resolve(pool: PgPool) {
    let store = store(pool);

    let id = store.save("https://example.com", "pg1").await.unwrap();

    assert!(id > 0);
    assert_eq!(store.resolve("pg1").await.unwrap(), "https://example.com");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_alias_is_alias_exists(pool: PgPool) {
    let store = store(pool.clone());
    store.save("https://first.com", "dup").await.unwrap();

    let err = store.save("https://second.com", "dup").await.unwrap_err();

    assert_eq!(err, StoreError::AliasExists("dup".to_string()));
    assert_eq!(store.resolve("dup").await.unwrap(), "https://first.com");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE alias = 'dup'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_resolve_unknown_alias(pool: PgPool) {
    let store = store(pool);

    let err = store.resolve("nope").await.unwrap_err();

    assert_eq!(err, StoreError::NotFound("nope".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_saves_on_same_alias_have_one_winner(pool: PgPool) {
    let store = Arc::new(store(pool));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .save(&format!("https://example{i}.com"), "contested")
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(StoreError::AliasExists(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    assert!(store(pool).health_check().await);
}
