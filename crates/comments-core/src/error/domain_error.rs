//! Domain rule violations and storage faults

use thiserror::Error;

use crate::value_objects::{Snowflake, UnknownReactionKind};

/// Every way a comment operation can fail, as the domain sees it
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Comment text must not be empty")]
    EmptyCommentText,

    #[error("Comment too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error(transparent)]
    UnknownReactionKind(#[from] UnknownReactionKind),

    /// Only the author may delete a comment
    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The write may still land; the caller just stopped waiting
    #[error("Storage operation timed out")]
    StorageTimeout,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable code for logs and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyCommentText => "EMPTY_COMMENT_TEXT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::UnknownReactionKind(_) => "UNKNOWN_REACTION_KIND",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageTimeout => "STORAGE_TIMEOUT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommentNotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyCommentText
                | Self::ContentTooLong { .. }
                | Self::UnknownReactionKind(_)
        )
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor)
    }

    /// Storage faults are the only failures worth retrying
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::StorageTimeout)
    }
}
