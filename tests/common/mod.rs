#![allow(dead_code)]

use alias_shortener::application::services::AssignmentPolicy;
use alias_shortener::domain::repositories::{StoreError, UrlStore};
use alias_shortener::infrastructure::persistence::MemoryUrlStore;
use alias_shortener::routes::app_router;
use alias_shortener::state::{AppState, Credentials};
use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const TEST_USER: &str = "myuser";
pub const TEST_PASSWORD: &str = "mypass";

/// `Basic base64("myuser:mypass")`.
pub const VALID_AUTH: &str = "Basic bXl1c2VyOm15cGFzcw==";

/// `Basic base64("myuser:wrong")`.
pub const WRONG_AUTH: &str = "Basic bXl1c2VyOndyb25n";

/// Backend message carrying details that must never reach a client.
pub const BACKEND_SECRET: &str =
    "password authentication failed for user \"admin\" at 10.0.0.5 via db-primary.internal:5432";

/// Store whose saves never complete within a test's lifetime.
pub struct StalledStore;

#[async_trait]
impl UrlStore for StalledStore {
    async fn save(&self, _url: &str, _alias: &str) -> Result<i64, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(1)
    }

    async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        Err(StoreError::NotFound(alias.to_string()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Store that fails every call with [`BACKEND_SECRET`].
pub struct FailingStore;

#[async_trait]
impl UrlStore for FailingStore {
    async fn save(&self, _url: &str, _alias: &str) -> Result<i64, StoreError> {
        Err(StoreError::Backend(BACKEND_SECRET.to_string()))
    }

    async fn resolve(&self, _alias: &str) -> Result<String, StoreError> {
        Err(StoreError::Backend(BACKEND_SECRET.to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_test_state(store: Arc<dyn UrlStore>) -> AppState {
    create_test_state_with_timeout(store, Duration::from_secs(10))
}

pub fn create_test_state_with_timeout(
    store: Arc<dyn UrlStore>,
    request_timeout: Duration,
) -> AppState {
    AppState::new(
        store,
        AssignmentPolicy::default(),
        Credentials::new(TEST_USER, TEST_PASSWORD),
        CancellationToken::new(),
        request_timeout,
    )
}

/// Full application stack over the given state.
pub fn create_server(state: AppState) -> TestServer {
    // Path normalization wraps the router, so it is mounted as a service.
    let app = Router::new().fallback_service(app_router(state));
    TestServer::new(app).unwrap()
}

/// Full application stack over a fresh in-memory store.
///
/// The store is returned so tests can seed and inspect it directly.
pub fn create_test_server() -> (TestServer, Arc<MemoryUrlStore>) {
    let store = Arc::new(MemoryUrlStore::new());
    let server = create_server(create_test_state(store.clone()));

    (server, store)
}
