//! HTTP-facing application error.
//!
//! Every error leaving a handler is an [`AppError`], rendered as
//! `{"error": {"code", "message", "details"}}` with a status code that
//! preserves the classification of the underlying failure.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{AssignmentError, ResolveError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    AliasTaken { message: String, details: Value },

    #[error("{message}")]
    AliasSpaceExhausted { message: String, details: Value },

    #[error("{message}")]
    Cancelled { message: String, details: Value },

    #[error("{message}")]
    StorageFailure { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn cancelled(message: impl Into<String>, details: Value) -> Self {
        Self::Cancelled {
            message: message.into(),
            details,
        }
    }

    pub fn storage_failure(message: impl Into<String>, details: Value) -> Self {
        Self::StorageFailure {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            Self::AliasTaken { .. } => (StatusCode::CONFLICT, "alias_taken"),
            Self::AliasSpaceExhausted { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "alias_space_exhausted")
            }
            Self::Cancelled { .. } => (StatusCode::SERVICE_UNAVAILABLE, "cancelled"),
            Self::StorageFailure { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::Unauthorized { message, details }
            | Self::NotFound { message, details }
            | Self::AliasTaken { message, details }
            | Self::AliasSpaceExhausted { message, details }
            | Self::Cancelled { message, details }
            | Self::StorageFailure { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"alias-shortener\""),
            );
        }

        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect::<serde_json::Map<String, Value>>();

        AppError::bad_request("Request validation failed", Value::Object(details))
    }
}

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::AliasTaken(alias) => AppError::AliasTaken {
                message: "Alias already exists".to_string(),
                details: json!({ "alias": alias }),
            },
            AssignmentError::AliasSpaceExhausted { attempts } => AppError::AliasSpaceExhausted {
                message: "Failed to generate unique alias".to_string(),
                details: json!({ "attempts": attempts }),
            },
            // The reason is logged by the service; backend text stays out of responses.
            AssignmentError::StorageFailure(_) => {
                AppError::storage_failure("Failed to save url", json!({}))
            }
            AssignmentError::Cancelled => {
                AppError::cancelled("Request was cancelled before completion", json!({}))
            }
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(alias) => {
                AppError::not_found("Short link not found", json!({ "alias": alias }))
            }
            ResolveError::StorageFailure(_) => {
                AppError::storage_failure("Failed to resolve alias", json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_errors_keep_distinct_statuses() {
        let taken: AppError = AssignmentError::AliasTaken("mylink".into()).into();
        let exhausted: AppError = AssignmentError::AliasSpaceExhausted { attempts: 5 }.into();
        let storage: AppError = AssignmentError::StorageFailure("down".into()).into();
        let cancelled: AppError = AssignmentError::Cancelled.into();

        assert_eq!(
            taken.status_and_code(),
            (StatusCode::CONFLICT, "alias_taken")
        );
        assert_eq!(
            exhausted.status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "alias_space_exhausted")
        );
        assert_eq!(
            storage.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
        );
        assert_eq!(
            cancelled.status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "cancelled")
        );
    }

    #[test]
    fn test_resolve_errors_map_to_not_found_and_storage_failure() {
        let missing: AppError = ResolveError::NotFound("nope".into()).into();
        let broken: AppError = ResolveError::StorageFailure("down".into()).into();

        assert_eq!(missing.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(broken.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_info_carries_details() {
        let err: AppError = AssignmentError::AliasTaken("mylink".into()).into();
        let info = err.to_error_info();

        assert_eq!(info.code, "alias_taken");
        assert_eq!(info.message, "Alias already exists");
        assert_eq!(info.details["alias"], "mylink");
    }

    #[test]
    fn test_storage_failure_details_are_empty() {
        let saved: AppError =
            AssignmentError::StorageFailure("connection to 10.0.0.5 refused".into()).into();
        let resolved: AppError =
            ResolveError::StorageFailure("pool timed out on db-primary:5432".into()).into();

        assert_eq!(saved.to_error_info().details, json!({}));
        assert_eq!(resolved.to_error_info().details, json!({}));
    }

    #[test]
    fn test_unauthorized_response_has_challenge_header() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
