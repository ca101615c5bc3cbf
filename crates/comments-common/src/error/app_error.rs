//! Application-level errors
//!
//! Everything the client sees collapses into `{success: false, message}`
//! on HTTP 200; the classification below only decides how loudly a
//! failure is logged.

use comments_core::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Errors shared across the non-domain layers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid session token")]
    InvalidToken,

    #[error("Session token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Stable code for logs and diagnostics
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// True when the caller's request, not the server, is at fault
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => false,
            Self::Domain(e) => !e.is_storage() && !matches!(e, DomainError::InternalError(_)),
            _ => true,
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<crate::auth::SessionError> for AppError {
    fn from(err: crate::auth::SessionError) -> Self {
        match err {
            crate::auth::SessionError::Expired => Self::TokenExpired,
            crate::auth::SessionError::Invalid => Self::InvalidToken,
        }
    }
}

/// The failure half of the uniform response envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
