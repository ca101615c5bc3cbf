//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Field names follow the camelCase wire convention the
//! storefront client uses.

use serde::Deserialize;
use validator::Validate;

/// Maximum comment length in characters, enforced by the service after
/// trimming
pub const MAX_COMMENT_LENGTH: u64 = 2000;

/// Post a comment on a product
///
/// `userName` and `userImage` are the author snapshot the client captured
/// from its session; the server falls back to the session token claims
/// when they are absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 128, message = "productId must be 1-128 characters"))]
    pub product_id: String,

    pub text: String,

    #[validate(length(max = 100, message = "userName must be at most 100 characters"))]
    pub user_name: Option<String>,

    #[validate(length(max = 2048, message = "userImage must be at most 2048 characters"))]
    pub user_image: Option<String>,
}

/// Toggle a reaction on a comment
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    #[validate(length(min = 1, message = "commentId is required"))]
    pub comment_id: String,

    /// Reaction kind name ("heart", "laugh", "ok")
    #[validate(length(min = 1, message = "reaction is required"))]
    pub reaction: String,
}
