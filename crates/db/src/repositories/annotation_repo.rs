//! Repository for the `annotations` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use threadnote_core::id::{generate_annotation_id, MAX_ID_ATTEMPTS};
use threadnote_core::pagination::{clamp_limit, clamp_offset};

use crate::models::annotation::{Annotation, AnnotationListParams, CreateAnnotation, UpdateAnnotation};

/// Column list for annotations queries.
const COLUMNS: &str = "id, email_id, text, position, user_email, annotation_label, \
    is_deleted, created_at, updated_at";

/// Name of the primary-key constraint; a 23505 on it means the candidate
/// short id collided with an existing row.
const PK_CONSTRAINT: &str = "annotations_pkey";

/// Provides CRUD operations for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation with a freshly generated short id.
    ///
    /// Each attempt binds a new candidate id and relies on the primary
    /// key as the sole serialization point: a unique violation on it
    /// triggers a retry with a fresh id, up to [`MAX_ID_ATTEMPTS`]
    /// attempts total. The final collision propagates to the caller.
    pub async fn create(
        pool: &PgPool,
        email_id: &str,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        Self::create_with_id_source(pool, email_id, input, generate_annotation_id).await
    }

    /// Like [`create`](Self::create) but with an injectable id source, so
    /// tests can force collisions deterministically.
    pub async fn create_with_id_source(
        pool: &PgPool,
        email_id: &str,
        input: &CreateAnnotation,
        mut next_id: impl FnMut() -> String,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations
                (id, email_id, text, position, user_email, annotation_label)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let id = next_id();
            let result = sqlx::query_as::<_, Annotation>(&query)
                .bind(&id)
                .bind(email_id)
                .bind(&input.text)
                .bind(&input.position)
                .bind(&input.user_email)
                .bind(&input.annotation_label)
                .fetch_one(pool)
                .await;

            match result {
                Ok(row) => return Ok(row),
                Err(err) if attempt < MAX_ID_ATTEMPTS && is_short_id_collision(&err) => {
                    tracing::warn!(attempt, id = %id, "Annotation id collision, retrying with a fresh id");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// List non-deleted annotations for a thread, newest first.
    pub async fn list(
        pool: &PgPool,
        email_id: &str,
        params: &AnnotationListParams,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM annotations"));
        push_filters(&mut qb, email_id, params);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(clamp_limit(params.limit))
            .push(" OFFSET ")
            .push_bind(clamp_offset(params.offset));

        qb.build_query_as::<Annotation>().fetch_all(pool).await
    }

    /// Count non-deleted annotations matching the same filters as [`list`](Self::list).
    pub async fn count(
        pool: &PgPool,
        email_id: &str,
        params: &AnnotationListParams,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM annotations");
        push_filters(&mut qb, email_id, params);

        let (count,): (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(count)
    }

    /// Find a single non-deleted annotation, matching both keys
    /// case-insensitively.
    pub async fn find(
        pool: &PgPool,
        email_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE LOWER(id) = LOWER($1) AND LOWER(email_id) = LOWER($2) AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(annotation_id)
            .bind(email_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an annotation including soft-deleted rows (internal bypass).
    pub async fn find_any(
        pool: &PgPool,
        email_id: &str,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE LOWER(id) = LOWER($1) AND LOWER(email_id) = LOWER($2)"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(annotation_id)
            .bind(email_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted annotation by its id alone (comment parent lookup).
    pub async fn find_by_id(
        pool: &PgPool,
        annotation_id: &str,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE LOWER(id) = LOWER($1) AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(annotation_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        email_id: &str,
        annotation_id: &str,
        input: &UpdateAnnotation,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                text = COALESCE($1, text),
                position = COALESCE($2, position),
                annotation_label = COALESCE($3, annotation_label),
                updated_at = now()
             WHERE LOWER(id) = LOWER($4) AND LOWER(email_id) = LOWER($5) AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(&input.text)
            .bind(&input.position)
            .bind(&input.annotation_label)
            .bind(annotation_id)
            .bind(email_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an annotation. Returns true if a row was flagged.
    pub async fn soft_delete(
        pool: &PgPool,
        email_id: &str,
        annotation_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE annotations SET is_deleted = TRUE, updated_at = now()
             WHERE LOWER(id) = LOWER($1) AND LOWER(email_id) = LOWER($2) AND is_deleted = FALSE",
        )
        .bind(annotation_id)
        .bind(email_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Push the shared WHERE clause for list/count queries.
fn push_filters<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    email_id: &'a str,
    params: &'a AnnotationListParams,
) {
    qb.push(" WHERE is_deleted = FALSE AND LOWER(email_id) = LOWER(")
        .push_bind(email_id)
        .push(")");

    if let Some(ref user_email) = params.user_email {
        qb.push(" AND user_email = ").push_bind(user_email);
    }
    if let Some(ref label) = params.annotation_label {
        qb.push(" AND annotation_label = ").push_bind(label);
    }
    if let Some(created_after) = params.created_after {
        qb.push(" AND created_at >= ").push_bind(created_after);
    }
    if let Some(created_before) = params.created_before {
        qb.push(" AND created_at <= ").push_bind(created_before);
    }
    if let Some(ref search) = params.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (user_email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR annotation_label ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR text ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR position ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// True when the error is a unique violation on the short-id primary key.
fn is_short_id_collision(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(PK_CONSTRAINT)
        }
        _ => false,
    }
}
