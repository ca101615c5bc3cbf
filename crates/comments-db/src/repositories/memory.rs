//! In-memory implementation of CommentRepository
//!
//! Backed by a `DashMap` keyed by comment id. Mutating a comment goes
//! through `get_mut`, which holds that entry's shard lock for the duration
//! of the closure, giving the same per-comment atomicity the PostgreSQL
//! store gets from row locks. Used for tests and local development.

use async_trait::async_trait;
use dashmap::DashMap;

use comments_core::entities::Comment;
use comments_core::traits::{CommentRepository, RepoResult};
use comments_core::value_objects::{ReactionKind, Snowflake};

/// In-memory implementation of CommentRepository
#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    comments: DashMap<i64, Comment>,
}

impl MemoryCommentRepository {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored comments
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.comments
            .insert(comment.id.into_inner(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.comments.get(&id.into_inner()).map(|c| c.clone()))
    }

    async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.product_id == product_id)
            .map(|entry| entry.clone())
            .collect();

        // Newest first, id as tiebreaker
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.into_inner().cmp(&a.id.into_inner()))
        });

        Ok(comments)
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.comments.remove(&id.into_inner()).is_some())
    }

    async fn toggle_reaction(
        &self,
        id: Snowflake,
        kind: ReactionKind,
        user_id: &str,
    ) -> RepoResult<Option<Comment>> {
        // get_mut holds the entry lock across the flip
        match self.comments.get_mut(&id.into_inner()) {
            Some(mut entry) => {
                entry.reactions.toggle(kind, user_id);
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
