//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use comments_core::entities::Comment;
use comments_core::traits::{CommentRepository, RepoResult};
use comments_core::value_objects::{ReactionKind, Snowflake};

use crate::mappers::assemble_comment;
use crate::models::{CommentModel, CommentReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
///
/// Reaction toggles take a row lock on the comment (`SELECT ... FOR UPDATE`)
/// so that the membership check and the flip are a single atomic step per
/// comment. Concurrent toggles on the same comment serialize; toggles on
/// different comments proceed in parallel.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load a fully assembled comment inside an open transaction
    async fn load_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Snowflake,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let model = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, product_id, author_id, author_name, author_avatar_url, content, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut **tx)
        .await?;

        let Some(model) = model else {
            return Ok(None);
        };

        let reactions = sqlx::query_as::<_, CommentReactionModel>(
            r#"
            SELECT comment_id, kind, user_id
            FROM comment_reactions
            WHERE comment_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(&mut **tx)
        .await?;

        Ok(Some(assemble_comment(model, &reactions)))
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, product_id, author_id, author_name, author_avatar_url, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(&comment.product_id)
        .bind(&comment.author_id)
        .bind(&comment.author_name)
        .bind(comment.author_avatar_url.as_deref())
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let model = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, product_id, author_id, author_name, author_avatar_url, content, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let reactions = sqlx::query_as::<_, CommentReactionModel>(
            r#"
            SELECT comment_id, kind, user_id
            FROM comment_reactions
            WHERE comment_id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(assemble_comment(model, &reactions)))
    }

    #[instrument(skip(self))]
    async fn find_by_product(&self, product_id: &str) -> RepoResult<Vec<Comment>> {
        let models = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, product_id, author_id, author_name, author_avatar_url, content, created_at
            FROM comments
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        let reactions = sqlx::query_as::<_, CommentReactionModel>(
            r#"
            SELECT comment_id, kind, user_id
            FROM comment_reactions
            WHERE comment_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let comments = models
            .into_iter()
            .map(|model| {
                let rows: Vec<CommentReactionModel> = reactions
                    .iter()
                    .filter(|r| r.comment_id == model.id)
                    .cloned()
                    .collect();
                assemble_comment(model, &rows)
            })
            .collect();

        Ok(comments)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        // Reaction rows go with the comment via ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn toggle_reaction(
        &self,
        id: Snowflake,
        kind: ReactionKind,
        user_id: &str,
    ) -> RepoResult<Option<Comment>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the comment row for the duration of the flip so the
        // membership check below cannot race a concurrent toggle.
        let locked: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id FROM comments WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            return Ok(None);
        }

        let (already_reacted,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM comment_reactions
                WHERE comment_id = $1 AND kind = $2 AND user_id = $3
            )
            "#,
        )
        .bind(id.into_inner())
        .bind(kind.as_str())
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_reacted {
            sqlx::query(
                r#"
                DELETE FROM comment_reactions
                WHERE comment_id = $1 AND kind = $2 AND user_id = $3
                "#,
            )
            .bind(id.into_inner())
            .bind(kind.as_str())
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO comment_reactions (comment_id, kind, user_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id.into_inner())
            .bind(kind.as_str())
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let comment = Self::load_in_tx(&mut tx, id).await.map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
