//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its bound URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with the target in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the alias was never assigned.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.redirect_service.resolve(&alias).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}
