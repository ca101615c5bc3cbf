//! Comment entity - a single entry in a product's discussion thread

use chrono::{DateTime, Utc};

use crate::value_objects::{ReactionMap, Snowflake};

/// Comment entity
///
/// `author_name` and `author_avatar_url` are a display snapshot taken at
/// post time; they do not follow later profile changes. `author_id` is the
/// sole authority for delete permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub product_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub reactions: ReactionMap,
}

impl Comment {
    /// Create a new Comment with an empty reaction map
    pub fn new(
        id: Snowflake,
        product_id: String,
        author_id: String,
        author_name: String,
        author_avatar_url: Option<String>,
        text: String,
    ) -> Self {
        Self {
            id,
            product_id,
            author_id,
            author_name,
            author_avatar_url,
            text,
            created_at: Utc::now(),
            reactions: ReactionMap::new(),
        }
    }

    /// Check whether the given user wrote this comment
    #[inline]
    pub fn is_author(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }

    /// Check if comment text is blank
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
