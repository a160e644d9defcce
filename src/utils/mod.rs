//! Utility functions shared across layers.
//!
//! - [`alias_generator`] - Alias generation and caller alias validation
//! - [`db_error`] - Database error classification

pub mod alias_generator;
pub mod db_error;
