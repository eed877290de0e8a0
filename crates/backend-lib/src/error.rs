// crates/backend-lib/src/error.rs

//! Central error types + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use signup_common::FailureBody;
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "INT_001",
            AppError::Conflict(_) => "CONFLICT_001",
            AppError::Timeout(_) => "TIMEOUT_001",
            AppError::Config(_) => "CFG_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Internal(_) | AppError::Config(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Conflict(_) => "Resource already exists".to_string(),
            AppError::Timeout(_) => "An upstream service did not respond in time".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// A rejected signup or login, reported to the form as `{ error, username? }`.
///
/// Validators produce these with status 422; provider failures use 500 and
/// echo the submitted username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFailure {
    pub status: StatusCode,
    pub error: String,
    pub username: Option<String>,
}

impl SignupFailure {
    /// Client input failure (422)
    pub fn unprocessable(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: error.into(),
            username: None,
        }
    }

    /// Upstream provider failure (500)
    pub fn upstream(username: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            username: Some(username.into()),
        }
    }

    pub fn body(&self) -> FailureBody {
        FailureBody {
            error: self.error.clone(),
            username: self.username.clone(),
        }
    }
}

impl IntoResponse for SignupFailure {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}
