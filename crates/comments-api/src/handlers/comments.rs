//! Comment handlers
//!
//! Endpoints for posting, listing, reacting to, and deleting comments.

use axum::{extract::State, Json};
use comments_service::{AddCommentRequest, CommentService, ReactRequest};
use serde::Deserialize;
use validator::Validate;

use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, CommentEnvelope, CommentListEnvelope, StatusEnvelope};
use crate::state::AppState;

/// Query parameters for listing comments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
}

/// Query parameters for deleting a comment
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentQuery {
    #[validate(length(min = 1, message = "commentId is required"))]
    pub comment_id: String,
}

/// Post a comment on a product
///
/// POST /api/comments/add
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddCommentRequest>,
) -> ApiResult<Json<CommentEnvelope>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .add_comment(
            &auth.user_id,
            auth.display_name.as_deref(),
            auth.avatar_url.as_deref(),
            request,
        )
        .await?;

    Ok(Json(CommentEnvelope::new(comment)))
}

/// List comments for a product, newest first
///
/// GET /api/comments/get?productId=...
///
/// Listing is public; no session token required.
pub async fn get_comments(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListCommentsQuery>,
) -> ApiResult<Json<CommentListEnvelope>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(&query.product_id).await?;

    Ok(Json(CommentListEnvelope::new(comments)))
}

/// Toggle the caller's reaction on a comment
///
/// POST /api/comments/react
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<CommentEnvelope>> {
    let service = CommentService::new(state.service_context());
    let comment = service.toggle_reaction(&auth.user_id, request).await?;

    Ok(Json(CommentEnvelope::new(comment)))
}

/// Delete a comment (author only)
///
/// DELETE /api/comments/delete?commentId=...
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<DeleteCommentQuery>,
) -> ApiResult<Json<StatusEnvelope>> {
    let service = CommentService::new(state.service_context());
    service
        .delete_comment(&auth.user_id, &query.comment_id)
        .await?;

    Ok(Json(StatusEnvelope::ok("Comment deleted")))
}
