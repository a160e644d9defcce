//! Store implementations.
//!
//! # Stores
//!
//! - [`PgUrlStore`] - PostgreSQL via SQLx; uniqueness from a `UNIQUE` constraint
//! - [`MemoryUrlStore`] - In-process map; uniqueness from the entry API

pub mod memory_url_store;
pub mod pg_url_store;

pub use memory_url_store::MemoryUrlStore;
pub use pg_url_store::PgUrlStore;
