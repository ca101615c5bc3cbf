//! Comment store implementations
//!
//! PostgreSQL and in-memory implementations of the CommentRepository trait
//! defined in comments-core.

mod comment;
mod error;
mod memory;

pub use comment::PgCommentRepository;
pub use memory::MemoryCommentRepository;
