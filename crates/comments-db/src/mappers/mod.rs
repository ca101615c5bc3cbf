//! Entity to model mappers
//!
//! Conversions between domain entities (comments-core) and database models.

mod comment;

pub use comment::{assemble_comment, reaction_map_from_rows};
