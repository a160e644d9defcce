//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - [`crate::domain::repositories::UrlStore`] implementations

pub mod persistence;
