//! # comments-core
//!
//! Domain layer containing the comment entity, value objects, and the store
//! trait. This crate has zero dependencies on infrastructure (database, web
//! framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::Comment;
pub use error::DomainError;
pub use traits::{CommentRepository, RepoResult};
pub use value_objects::{
    ReactionKind, ReactionMap, Snowflake, SnowflakeGenerator, SnowflakeParseError,
    UnknownReactionKind,
};
