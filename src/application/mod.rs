//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlStore`] trait and provide
//! the API used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::assignment_service::AssignmentService`] - Binding URLs to unique aliases
//! - [`services::redirect_service::RedirectService`] - Resolving aliases back to URLs

pub mod services;
