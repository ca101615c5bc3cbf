//! Entity to response DTO mappers

use comments_core::entities::Comment;

use super::responses::CommentResponse;

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            product_id: comment.product_id.clone(),
            author_id: comment.author_id.clone(),
            author_name: comment.author_name.clone(),
            author_avatar_url: comment.author_avatar_url.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
            reactions: comment.reactions.clone(),
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}
