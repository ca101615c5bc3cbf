//! # comments-service
//!
//! Business logic layer. Services operate on the store through the
//! `ServiceContext` dependency container and expose request/response DTOs
//! to the API layer.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AddCommentRequest, CommentResponse, HealthResponse, ReactRequest, ReadinessResponse,
};
pub use services::{
    CommentService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
