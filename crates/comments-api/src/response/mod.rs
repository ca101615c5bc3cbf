//! Response types and error handling for API endpoints
//!
//! The wire contract is deliberately uniform: every response, success or
//! failure, is HTTP 200 with a `success` flag. Failures carry a `message`
//! the storefront client can surface directly. Transport-level concerns
//! (timeouts, CORS preflight) are the only places other status codes
//! appear.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use comments_common::AppError;
use comments_core::DomainError;
use comments_service::{CommentResponse, ServiceError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get error code for logging and diagnostics
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error indicates a server-side fault
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            Self::App(e) => e.is_server_error(),
            Self::Service(e) => e.is_server_error(),
            Self::Domain(e) => e.is_storage() || matches!(e, DomainError::InternalError(_)),
            Self::Validation(_)
            | Self::InvalidRequest(_)
            | Self::MissingAuth
            | Self::InvalidAuthFormat => false,
            Self::Internal(_) => true,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid request error with a custom message
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

/// Failure envelope body
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server errors; the client only sees the message
        if self.is_server_error() {
            error!(error = ?self, code = self.error_code(), "Server error occurred");
        }

        let body = FailureBody {
            success: false,
            message: self.to_string(),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Success envelope carrying a single comment
#[derive(Debug, Serialize)]
pub struct CommentEnvelope {
    pub success: bool,
    pub comment: CommentResponse,
}

impl CommentEnvelope {
    #[must_use]
    pub fn new(comment: CommentResponse) -> Self {
        Self {
            success: true,
            comment,
        }
    }
}

/// Success envelope carrying a comment listing
#[derive(Debug, Serialize)]
pub struct CommentListEnvelope {
    pub success: bool,
    pub comments: Vec<CommentResponse>,
}

impl CommentListEnvelope {
    #[must_use]
    pub fn new(comments: Vec<CommentResponse>) -> Self {
        Self {
            success: true,
            comments,
        }
    }
}

/// Success envelope for operations with no payload
#[derive(Debug, Serialize)]
pub struct StatusEnvelope {
    pub success: bool,
    pub message: String,
}

impl StatusEnvelope {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
