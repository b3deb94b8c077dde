//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] returned by the account
//! flows, the store and startup. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized) → 401 (wrong password *or* unknown user)
//!    - [`InvalidToken`](AppError::InvalidToken) / [`TokenExpired`](AppError::TokenExpired) → 401
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`Conflict`](AppError::Conflict) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`Config`](AppError::Config) → 500, fatal when raised during startup
//!    - [`Internal`](AppError::Internal) → 500 (store unavailable, corrupt rows, ...)
//!
//! A broken system never reports itself as bad credentials, and bad credentials never look
//! like a server fault. No variant is retried automatically.
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>`: unique violations become `Conflict`
//! - `From<lib_auth::pwd::Error>`, `From<lib_auth::identity::Error>`, `From<lib_auth::token::Error>`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::{identity, pwd, token};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Generic login failure message, shared by unknown-user and wrong-password paths.
pub const AUTH_FAILURE_MESSAGE: &str = "Invalid username or password";

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (malformed username, password rejected by policy).
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The username is already registered.
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login failed. Deliberately carries no detail.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Authentication failed")]
    Unauthorized,

    /// Token signature or structure is invalid.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token is past its expiry.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Token expired")]
    TokenExpired,

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidToken(_) | AppError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Server errors get a generic message so internals never reach the caller.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Unauthorized => AUTH_FAILURE_MESSAGE.to_string(),
            AppError::InvalidToken(_) => "Invalid token".to_string(),
            AppError::TokenExpired => "Token expired".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Conflict(_) => "Conflict",
            AppError::Unauthorized => "Unauthorized",
            AppError::InvalidToken(_) => "InvalidToken",
            AppError::TokenExpired => "TokenExpired",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` so a transport layer can return errors directly.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.error_code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username is taken".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<pwd::Error> for AppError {
    fn from(err: pwd::Error) -> Self {
        match err {
            pwd::Error::EmptyPassword | pwd::Error::PasswordTooShort { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            pwd::Error::Hash(_) | pwd::Error::CorruptCredential(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<identity::Error> for AppError {
    fn from(err: identity::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<token::Error> for AppError {
    fn from(err: token::Error) -> Self {
        match err {
            token::Error::Expired => AppError::TokenExpired,
            token::Error::InvalidSignature
            | token::Error::Malformed(_)
            | token::Error::InvalidSubject(_) => AppError::InvalidToken(err.to_string()),
            token::Error::KeyTooShort { .. } => AppError::Config(err.to_string()),
            token::Error::Encode(_) => AppError::Internal(err.to_string()),
        }
    }
}
