//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub product_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for the comment_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct CommentReactionModel {
    pub comment_id: i64,
    pub kind: String,
    pub user_id: String,
}
