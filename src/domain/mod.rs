//! Domain layer containing business entities and the storage contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! It defines what a short link is and what a store must guarantee for alias
//! assignment to be safe under concurrent requests.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Uniqueness
//!
//! The store is the sole arbiter of alias uniqueness. A single
//! [`repositories::UrlStore::save`] call either claims the alias or reports
//! [`repositories::StoreError::AliasExists`]; callers never look an alias up
//! first to "check" whether it is free.

pub mod entities;
pub mod repositories;
