//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] haven_core::EmailError),

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Bearer token absent, malformed, expired, or badly signed.
    #[error("invalid token")]
    InvalidToken,

    /// Token was valid but its user no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// Password hashing backend failure.
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Token signing failure.
    #[error("token signing error: {0}")]
    TokenSigning(String),

    /// Database error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
