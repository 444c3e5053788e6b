//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] — HTTP-facing error enum
//! - [`AppResponse`] — API response structure
//!
//! Error codes follow the `Exxxx` convention: `E0xxx` for client/business
//! errors, `E9xxx` for system errors. Business rejections (404/409) must be
//! distinguishable from transient failures (409 lock conflict, 500) so that
//! automated retry logic never retries a rejection.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Resource absent (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// State conflict: duplicate RSVP, double check-in, capacity exhausted,
    /// or a lost optimistic-lock race (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request failed validation before reaching the core (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Opaque store failure (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else that went wrong server-side (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::TableNotFound(_) | RepoError::GuestNotFound(_) | RepoError::NeverRsvpd(_) => {
                AppError::NotFound(err.to_string())
            }
            RepoError::AlreadyRsvpd(_)
            | RepoError::AlreadyArrived(_)
            | RepoError::NotArrived(_)
            | RepoError::TableFull { .. }
            | RepoError::OptimisticLock => AppError::Conflict(err.to_string()),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;
