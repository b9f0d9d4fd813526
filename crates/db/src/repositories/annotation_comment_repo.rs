//! Repository for the `annotation_comments` table.

use sqlx::PgPool;
use threadnote_core::pagination::{clamp_limit, clamp_offset};

use crate::models::annotation_comment::{AnnotationComment, CreateAnnotationComment};

/// Column list for annotation_comments queries.
const COLUMNS: &str = "id, annotation_id, text, author_email, is_deleted, \
    created_at, updated_at";

/// Provides CRUD operations for annotation comments.
pub struct AnnotationCommentRepo;

impl AnnotationCommentRepo {
    /// Insert a new comment on an annotation.
    ///
    /// A violation of `uq_annotation_comments_author` (one comment per
    /// author per annotation) propagates to the caller.
    pub async fn create(
        pool: &PgPool,
        annotation_id: &str,
        input: &CreateAnnotationComment,
    ) -> Result<AnnotationComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotation_comments (annotation_id, text, author_email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationComment>(&query)
            .bind(annotation_id)
            .bind(&input.text)
            .bind(&input.author_email)
            .fetch_one(pool)
            .await
    }

    /// List non-deleted comments for an annotation, newest first.
    pub async fn list_by_annotation(
        pool: &PgPool,
        annotation_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AnnotationComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotation_comments
             WHERE annotation_id = $1 AND is_deleted = FALSE
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AnnotationComment>(&query)
            .bind(annotation_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Count non-deleted comments for an annotation.
    pub async fn count_by_annotation(
        pool: &PgPool,
        annotation_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM annotation_comments
             WHERE annotation_id = $1 AND is_deleted = FALSE",
        )
        .bind(annotation_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Find a non-deleted comment scoped to its annotation.
    pub async fn find(
        pool: &PgPool,
        annotation_id: &str,
        comment_id: i64,
    ) -> Result<Option<AnnotationComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotation_comments
             WHERE id = $1 AND annotation_id = $2 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, AnnotationComment>(&query)
            .bind(comment_id)
            .bind(annotation_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a comment's text, returning the updated row.
    pub async fn update_text(
        pool: &PgPool,
        annotation_id: &str,
        comment_id: i64,
        text: &str,
    ) -> Result<Option<AnnotationComment>, sqlx::Error> {
        let query = format!(
            "UPDATE annotation_comments SET text = $1, updated_at = now()
             WHERE id = $2 AND annotation_id = $3 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationComment>(&query)
            .bind(text)
            .bind(comment_id)
            .bind(annotation_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a comment. Returns true if a row was flagged.
    pub async fn soft_delete(
        pool: &PgPool,
        annotation_id: &str,
        comment_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE annotation_comments SET is_deleted = TRUE, updated_at = now()
             WHERE id = $1 AND annotation_id = $2 AND is_deleted = FALSE",
        )
        .bind(comment_id)
        .bind(annotation_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
