//! Repository trait (port) - the Comment Store contract
//!
//! The domain layer defines what persistence it needs; the storage layer
//! provides the implementations.

use async_trait::async_trait;

use crate::entities::Comment;
use crate::error::DomainError;
use crate::value_objects::{ReactionKind, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Comment Store contract
///
/// The store is the only shared mutable resource in the system and the sole
/// synchronization point: implementations must serialize reaction mutations
/// per comment while leaving unrelated comments free to proceed in parallel.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a fully-formed comment (id and timestamp already assigned)
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Find a comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// All comments for a product, newest first. A fresh snapshot per call.
    async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Comment>>;

    /// Hard-delete a comment and its reaction records.
    /// Returns `false` when the id does not exist.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Atomic read-then-flip of one (kind, user) membership.
    ///
    /// The flip is decided against the store's state at mutation time:
    /// a current member is removed, a non-member is added. Concurrent
    /// toggles on the same comment are serialized so none is dropped.
    /// Returns the post-mutation comment, or `None` if the id is unknown.
    async fn toggle_reaction(
        &self,
        id: Snowflake,
        kind: ReactionKind,
        user_id: &str,
    ) -> RepoResult<Option<Comment>>;

    /// Cheap connectivity check for readiness probes
    async fn ping(&self) -> RepoResult<()>;
}
