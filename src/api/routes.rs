//! API route configuration.

use crate::api::handlers::save_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Routes requiring basic authentication.
///
/// # Endpoints
///
/// - `POST /url` - Bind a URL to an alias
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/url", post(save_handler))
}
