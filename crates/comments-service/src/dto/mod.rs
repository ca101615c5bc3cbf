//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{AddCommentRequest, ReactRequest, MAX_COMMENT_LENGTH};
pub use responses::{CommentResponse, HealthResponse, ReadinessResponse};
