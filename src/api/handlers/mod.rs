//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod save;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use save::save_handler;
