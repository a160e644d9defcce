//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A persisted alias to URL binding
//! - [`Assignment`] - The result of binding a URL to an alias

pub mod short_link;

pub use short_link::{Assignment, ShortLink};
