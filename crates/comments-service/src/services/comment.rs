//! Comment service
//!
//! Handles posting, listing, deleting comments and toggling reactions.
//!
//! Storage mutations run on detached tasks: a client that disconnects
//! mid-request does not cancel the write. The caller waits for the task up
//! to the configured storage wait and reports a timeout if it is exceeded,
//! while the write itself runs to completion.

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use validator::Validate;

use comments_core::entities::Comment;
use comments_core::traits::RepoResult;
use comments_core::value_objects::{ReactionKind, Snowflake};
use comments_core::DomainError;

use crate::dto::{AddCommentRequest, CommentResponse, ReactRequest, MAX_COMMENT_LENGTH};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Fallback display name when neither the request nor the session token
/// carries one
const ANONYMOUS_NAME: &str = "Anonymous";

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new comment on a product
    ///
    /// The author snapshot (name and avatar) prefers what the request
    /// carries, then the session token claims. It is captured once here
    /// and never refreshed.
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn add_comment(
        &self,
        author_id: &str,
        claim_name: Option<&str>,
        claim_avatar: Option<&str>,
        request: AddCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        // The session token is the only source of the author id, but a
        // provider can still mint a token with an empty subject.
        if author_id.trim().is_empty() {
            return Err(ServiceError::validation("user identity is required"));
        }

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let text = request.text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyCommentText.into());
        }
        if text.chars().count() as u64 > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH as usize,
            }
            .into());
        }

        let author_name = request
            .user_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(claim_name)
            .unwrap_or(ANONYMOUS_NAME)
            .to_string();
        let author_avatar_url = request
            .user_image
            .clone()
            .or_else(|| claim_avatar.map(String::from));

        let comment = Comment::new(
            self.ctx.generate_id(),
            request.product_id.clone(),
            author_id.to_string(),
            author_name,
            author_avatar_url,
            text.to_string(),
        );

        let repo = self.ctx.comment_repo_arc();
        let stored = comment.clone();
        self.await_detached(tokio::spawn(
            async move { repo.create(&stored).await },
        ))
        .await?;

        info!(comment_id = %comment.id, "Comment created");

        Ok(CommentResponse::from(&comment))
    }

    /// List all comments for a product, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, product_id: &str) -> ServiceResult<Vec<CommentResponse>> {
        if product_id.trim().is_empty() {
            return Err(ServiceError::validation("productId is required"));
        }

        let comments = self.ctx.comment_repo().find_by_product(product_id).await?;

        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    /// Toggle the caller's reaction of the given kind on a comment
    ///
    /// Returns the comment as it stands after the flip.
    #[instrument(skip(self, request), fields(comment_id = %request.comment_id))]
    pub async fn toggle_reaction(
        &self,
        user_id: &str,
        request: ReactRequest,
    ) -> ServiceResult<CommentResponse> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::validation("user identity is required"));
        }

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let comment_id = parse_comment_id(&request.comment_id)?;
        let kind = ReactionKind::parse(&request.reaction).map_err(DomainError::from)?;

        let repo = self.ctx.comment_repo_arc();
        let user = user_id.to_string();
        let updated = self
            .await_detached(tokio::spawn(async move {
                repo.toggle_reaction(comment_id, kind, &user).await
            }))
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", request.comment_id.clone()))?;

        info!(
            comment_id = %comment_id,
            kind = %kind,
            reacted = updated.reactions.has_reacted(kind, user_id),
            "Reaction toggled"
        );

        Ok(CommentResponse::from(&updated))
    }

    /// Delete a comment, enforcing that only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, user_id: &str, comment_id: &str) -> ServiceResult<()> {
        let id = parse_comment_id(comment_id)?;

        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id))?;

        // Ownership is checked against the stable author id from the
        // session token, never against display names.
        if !comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let repo = self.ctx.comment_repo_arc();
        let deleted = self
            .await_detached(tokio::spawn(async move { repo.delete(id).await }))
            .await?;

        if !deleted {
            // Raced another delete between the ownership check and here
            return Err(ServiceError::not_found("Comment", comment_id));
        }

        info!(comment_id = %id, "Comment deleted");

        Ok(())
    }

    /// Wait for a detached storage mutation, bounded by the storage wait
    ///
    /// On timeout the task is left running so the mutation still lands;
    /// only the caller gives up.
    async fn await_detached<T>(&self, handle: JoinHandle<RepoResult<T>>) -> ServiceResult<T> {
        match timeout(self.ctx.storage_wait(), handle).await {
            Ok(Ok(result)) => Ok(result?),
            Ok(Err(join_err)) => Err(ServiceError::internal(format!(
                "storage task failed: {join_err}"
            ))),
            Err(_) => {
                warn!("storage mutation exceeded wait budget, abandoning response");
                Err(DomainError::StorageTimeout.into())
            }
        }
    }
}

fn parse_comment_id(raw: &str) -> ServiceResult<Snowflake> {
    Snowflake::parse(raw).map_err(|_| ServiceError::validation("Invalid comment id"))
}
