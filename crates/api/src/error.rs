//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Image storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed or missing input from the client.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource lookup by unknown identifier.
    ///
    /// Surfaces as 400, matching the existing API contract for unknown IDs
    /// (the deviation from a conventional 404 is documented in DESIGN.md).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Minimal JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if status_for(&self) == StatusCode::INTERNAL_SERVER_ERROR {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = status_for(&self);

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                "Internal server error".to_owned()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(e) => format!("invalid email: {e}"),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::EmailTaken => "email already registered".to_owned(),
                AuthError::InvalidToken | AuthError::UserNotFound => "invalid token".to_owned(),
                AuthError::PasswordHash(_)
                | AuthError::TokenSigning(_)
                | AuthError::Repository(_) => "Internal server error".to_owned(),
            },
            Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::Auth(auth) => match auth {
            AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) | AuthError::EmailTaken => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidToken | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHash(_) | AuthError::TokenSigning(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        AppError::Validation(_) | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("image 5784578".to_owned());
        assert_eq!(err.to_string(), "Not found: image 5784578");

        let err = AppError::Validation("name is required".to_owned());
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_unknown_id_maps_to_bad_request() {
        // Observed contract: unknown identifiers answer 400, not 404.
        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        assert_eq!(
            get_status(AppError::Validation("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::UserNotFound)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_email_taken_maps_to_bad_request() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let response = AppError::Internal("secret connection string".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
