//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;

pub use comment::{CommentModel, CommentReactionModel};
