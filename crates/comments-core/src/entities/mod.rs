//! Domain entities

mod comment;

pub use comment::Comment;
