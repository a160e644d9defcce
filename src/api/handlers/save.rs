//! Handler for the save endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::alias_generator::validate_custom_alias;

/// Binds a URL to a caller-chosen or generated alias.
///
/// # Endpoint
///
/// `POST /url` (basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "mylink" }
/// ```
///
/// `alias` may be omitted or empty to get a generated one.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "mylink" }
/// ```
///
/// # Errors
///
/// - 400 if the URL or alias is invalid
/// - 409 if the requested alias is already taken
/// - 503 if no unique alias could be generated, or the request ran out of time
/// - 500 on storage failures
pub async fn save_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    payload.validate()?;

    let alias = payload.alias.as_deref().filter(|a| !a.is_empty());
    if let Some(alias) = alias {
        validate_custom_alias(alias)?;
    }

    info!(url = %payload.url, alias = ?alias, "request body decoded");

    let cancel = state.shutdown.child_token();
    let assign = state
        .assignment_service
        .assign(&payload.url, alias, &cancel);

    let assignment = match tokio::time::timeout(state.request_timeout, assign).await {
        Ok(result) => result?,
        Err(_) => {
            cancel.cancel();
            warn!(
                timeout_secs = state.request_timeout.as_secs(),
                "assignment timed out"
            );
            return Err(AppError::cancelled(
                "Request timed out before the link was saved",
                json!({ "timeout_secs": state.request_timeout.as_secs() }),
            ));
        }
    };

    Ok(Json(SaveResponse::ok(assignment.alias)))
}
