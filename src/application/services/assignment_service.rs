//! Alias assignment: binding a URL to a caller-chosen or generated alias.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::domain::entities::Assignment;
use crate::domain::repositories::{StoreError, UrlStore};
use crate::utils::alias_generator::AliasGenerator;

/// Length of generated aliases unless configured otherwise.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Generation attempts per call unless configured otherwise.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Tunables of the assignment loop, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentPolicy {
    pub alias_length: usize,
    pub max_retries: usize,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Why an assignment did not produce a binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// The caller-chosen alias is already bound. Never retried.
    #[error("alias already exists: {0}")]
    AliasTaken(String),

    /// Every generated candidate collided.
    #[error("failed to generate unique alias after {attempts} attempts")]
    AliasSpaceExhausted { attempts: usize },

    /// The store failed for a reason other than a collision.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// The caller stopped waiting; no success is reported after this point.
    #[error("assignment cancelled")]
    Cancelled,
}

/// Service binding URLs to unique aliases.
///
/// Mutual exclusion is entirely delegated to [`UrlStore::save`]: the service never
/// looks an alias up before saving it, and the retry loop is sequential within one
/// call.
pub struct AssignmentService<S: UrlStore + ?Sized, G: AliasGenerator> {
    store: Arc<S>,
    generator: G,
    policy: AssignmentPolicy,
}

impl<S: UrlStore + ?Sized, G: AliasGenerator> AssignmentService<S, G> {
    /// Creates a new assignment service.
    pub fn new(store: Arc<S>, generator: G, policy: AssignmentPolicy) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    /// Binds `url` to `caller_alias`, or to a generated alias when none is given.
    ///
    /// An empty `caller_alias` is treated as absent.
    ///
    /// # Caller-supplied alias
    ///
    /// Exactly one save is attempted. A collision fails with
    /// [`AssignmentError::AliasTaken`]; the requested name is never substituted.
    ///
    /// # Generated alias
    ///
    /// Up to `max_retries` candidates of `alias_length` characters are tried in
    /// order. Collisions move on to the next candidate, any other store error stops
    /// the loop immediately.
    ///
    /// # Cancellation
    ///
    /// `cancel` is checked before each attempt and raced against the pending save.
    ///
    /// # Errors
    ///
    /// - [`AssignmentError::AliasTaken`] if the caller alias is bound already
    /// - [`AssignmentError::AliasSpaceExhausted`] if every candidate collided
    /// - [`AssignmentError::StorageFailure`] on non-collision store errors
    /// - [`AssignmentError::Cancelled`] if `cancel` fired first
    pub async fn assign(
        &self,
        url: &str,
        caller_alias: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Assignment, AssignmentError> {
        match caller_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) => self.assign_requested(url, alias, cancel).await,
            None => self.assign_generated(url, cancel).await,
        }
    }

    async fn assign_requested(
        &self,
        url: &str,
        alias: &str,
        cancel: &CancellationToken,
    ) -> Result<Assignment, AssignmentError> {
        match self.save(url, alias, cancel).await? {
            Ok(id) => {
                info!(alias, id, "url added");
                Ok(Assignment::new(alias, id))
            }
            Err(StoreError::AliasExists(_)) => {
                info!(alias, "alias already exists");
                Err(AssignmentError::AliasTaken(alias.to_string()))
            }
            Err(e) => {
                error!(alias, error = %e, "failed to save url");
                Err(AssignmentError::StorageFailure(e.to_string()))
            }
        }
    }

    async fn assign_generated(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Assignment, AssignmentError> {
        for attempt in 1..=self.policy.max_retries {
            let candidate = self.generator.generate(self.policy.alias_length);

            match self.save(url, &candidate, cancel).await? {
                Ok(id) => {
                    info!(alias = %candidate, id, attempt, "url added");
                    return Ok(Assignment::new(candidate, id));
                }
                Err(StoreError::AliasExists(_)) => {
                    info!(alias = %candidate, attempt, "alias collision, retrying");
                }
                Err(e) => {
                    error!(attempt, error = %e, "failed to save url");
                    return Err(AssignmentError::StorageFailure(e.to_string()));
                }
            }
        }

        error!(
            max_retries = self.policy.max_retries,
            alias_length = self.policy.alias_length,
            "failed to generate unique alias after retries"
        );
        Err(AssignmentError::AliasSpaceExhausted {
            attempts: self.policy.max_retries,
        })
    }

    /// One store save, abandoned if `cancel` fires first.
    ///
    /// The outer `Err` is cancellation; the inner result is the store outcome.
    async fn save(
        &self,
        url: &str,
        alias: &str,
        cancel: &CancellationToken,
    ) -> Result<Result<i64, StoreError>, AssignmentError> {
        if cancel.is_cancelled() {
            warn!(alias, "assignment cancelled before save");
            return Err(AssignmentError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(alias, "assignment cancelled while saving");
                Err(AssignmentError::Cancelled)
            }
            result = self.store.save(url, alias) => Ok(result),
        }
    }
}
