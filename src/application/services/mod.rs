//! Business logic services for the application layer.

pub mod assignment_service;
pub mod redirect_service;

pub use assignment_service::{AssignmentError, AssignmentPolicy, AssignmentService};
pub use redirect_service::{RedirectService, ResolveError};
