//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use crate::application::services::{AssignmentPolicy, AssignmentService, RedirectService};
use crate::domain::repositories::UrlStore;
use crate::utils::alias_generator::RandomAliasGenerator;

pub type SharedStore = Arc<dyn UrlStore>;

/// Basic auth credentials accepted on protected routes.
///
/// Only SHA-256 digests are kept; candidates are hashed and compared in
/// constant time.
#[derive(Clone)]
pub struct Credentials {
    user_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl Credentials {
    pub fn new(user: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        Self {
            user_digest: digest(user.as_ref()),
            password_digest: digest(password.as_ref()),
        }
    }

    pub fn matches(&self, user: &str, password: Option<&str>) -> bool {
        let Some(password) = password else {
            return false;
        };

        // Both halves are always compared.
        let user_ok = constant_time_eq(&self.user_digest, &digest(user));
        let password_ok = constant_time_eq(&self.password_digest, &digest(password));

        user_ok & password_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Clone)]
pub struct AppState {
    pub assignment_service: Arc<AssignmentService<dyn UrlStore, RandomAliasGenerator>>,
    pub redirect_service: Arc<RedirectService<dyn UrlStore>>,
    pub credentials: Arc<Credentials>,
    /// Cancelled on shutdown; every assignment runs under a child token.
    pub shutdown: CancellationToken,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires the services around a single store.
    pub fn new(
        store: SharedStore,
        policy: AssignmentPolicy,
        credentials: Credentials,
        shutdown: CancellationToken,
        request_timeout: Duration,
    ) -> Self {
        let assignment_service = Arc::new(AssignmentService::new(
            store.clone(),
            RandomAliasGenerator::new(),
            policy,
        ));
        let redirect_service = Arc::new(RedirectService::new(store));

        Self {
            assignment_service,
            redirect_service,
            credentials: Arc::new(credentials),
            shutdown,
            request_timeout,
        }
    }
}
