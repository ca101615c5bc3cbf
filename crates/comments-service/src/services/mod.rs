//! Service layer - business logic over the comment store

mod comment;
mod context;
mod error;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
