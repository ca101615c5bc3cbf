//! Comment entity <-> model mapper

use comments_core::entities::Comment;
use comments_core::value_objects::{ReactionKind, ReactionMap, Snowflake};
use tracing::warn;

use crate::models::{CommentModel, CommentReactionModel};

/// Convert CommentModel to a Comment entity with no reactions attached
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            product_id: model.product_id,
            author_id: model.author_id,
            author_name: model.author_name,
            author_avatar_url: model.author_avatar_url,
            text: model.content,
            created_at: model.created_at,
            reactions: ReactionMap::new(),
        }
    }
}

/// Build a ReactionMap from reaction rows belonging to one comment
///
/// Rows with a kind that is no longer part of the reaction vocabulary are
/// skipped with a warning rather than failing the whole load.
pub fn reaction_map_from_rows<'a, I>(rows: I) -> ReactionMap
where
    I: IntoIterator<Item = &'a CommentReactionModel>,
{
    let mut map = ReactionMap::new();
    for row in rows {
        match ReactionKind::parse(&row.kind) {
            Ok(kind) => map.insert(kind, row.user_id.clone()),
            Err(_) => {
                warn!(
                    comment_id = row.comment_id,
                    kind = %row.kind,
                    "skipping reaction row with unknown kind"
                );
            }
        }
    }
    map
}

/// Assemble a full Comment entity from its row and its reaction rows
pub fn assemble_comment(model: CommentModel, reactions: &[CommentReactionModel]) -> Comment {
    let mut comment = Comment::from(model);
    comment.reactions = reaction_map_from_rows(reactions);
    comment
}
