//! Application error type and the uniform HTTP response envelope.
//!
//! The core exposes exactly five error kinds (§7 of the inventory spec).
//! Recovery policy is "none": a rollback is the only corrective action, and
//! duplicate-key violations on generated human codes are always `Internal`,
//! never silently retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The envelope every route returns, success or failure (§6).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                "an internal error occurred".to_string()
            },
            other => other.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "code": status.as_u16(),
            "data": serde_json::Value::Null,
        }));

        (status, body).into_response()
    }
}

/// Duplicate-key violations on a generated human code surface as `Internal`
/// and must never be retried automatically (the allocator's contract was
/// broken, not the caller's input).
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                tracing::error!(error = %db_err, "unique constraint violated");
                return AppError::Internal(format!("unique constraint violated: {db_err}"));
            }
        }
        AppError::Internal(format!("database error: {err}"))
    }
}
