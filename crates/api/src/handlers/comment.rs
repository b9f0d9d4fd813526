//! Handlers for comments on annotations.
//!
//! The same context-tagging pattern as the annotation handlers: the
//! fallible body runs in an async block and failures carry the
//! operation and ids into the failure log.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use threadnote_core::comment::{check_comment_author, check_comment_window};
use threadnote_core::pagination::{clamp_limit, clamp_offset};
use threadnote_core::validation::{validate_email, validate_required_text};
use threadnote_core::CoreError;
use threadnote_db::models::annotation::Annotation;
use threadnote_db::models::annotation_comment::{AnnotationComment, CreateAnnotationComment};
use threadnote_db::repositories::{AnnotationCommentRepo, AnnotationRepo};

use crate::error::{AppResult, ErrorContext};
use crate::handlers::{required, verify_participant};
use crate::response::{Envelope, Paginated};
use crate::state::AppState;

/// Request body for commenting on an annotation.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub author_email: Option<String>,
    pub text: Option<String>,
}

/// Request body for updating a comment.
///
/// Only `text` may change; any other field lands in `extra` and is
/// rejected with a precise message.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub author_email: Option<String>,
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Query parameters identifying the acting author on reads and deletes.
#[derive(Debug, Deserialize)]
pub struct CommentActorParams {
    pub author_email: Option<String>,
}

/// Pagination query parameters for the comment list.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Resolve the parent annotation or fail `NotFound`.
async fn find_parent(state: &AppState, annotation_id: &str) -> AppResult<Annotation> {
    AnnotationRepo::find_by_id(&state.pool, annotation_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "annotation",
                id: annotation_id.to_string(),
            }
            .into()
        })
}

/// Fetch a comment and check the author and 24h-window rules against it.
async fn find_actionable_comment(
    state: &AppState,
    annotation_id: &str,
    comment_id: i64,
    actor_email: &str,
) -> AppResult<AnnotationComment> {
    let comment = AnnotationCommentRepo::find(&state.pool, annotation_id, comment_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "comment",
            id: comment_id.to_string(),
        })?;

    check_comment_window(comment.created_at, Utc::now())?;
    check_comment_author(&comment.author_email, actor_email)?;
    Ok(comment)
}

/// POST /threads/annotation/{annotation_id}/comment/
///
/// Comment on an annotation. The author must be a participant of the
/// parent annotation's thread; one comment per author per annotation.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(annotation_id): Path<String>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("create_comment").annotation_id(&annotation_id);
    let result: AppResult<_> = async {
        let author_email = required("author_email", input.author_email)?;
        validate_email("author_email", &author_email)?;
        let text = required("text", input.text)?;
        validate_required_text("text", &text)?;

        let parent = find_parent(&state, &annotation_id).await?;
        verify_participant(&state, &parent.email_id, &author_email).await?;

        let comment = AnnotationCommentRepo::create(
            &state.pool,
            &parent.id,
            &CreateAnnotationComment { author_email, text },
        )
        .await?;

        tracing::info!(
            annotation_id = %parent.id,
            comment_id = comment.id,
            author_email = %comment.author_email,
            "Comment posted"
        );

        Ok((StatusCode::CREATED, Json(Envelope::success(comment))))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// GET /threads/annotation/{annotation_id}/comment/
///
/// Paginated list of non-deleted comments, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(annotation_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("list_comments").annotation_id(&annotation_id);
    let result: AppResult<_> = async {
        let parent = find_parent(&state, &annotation_id).await?;

        let items = AnnotationCommentRepo::list_by_annotation(
            &state.pool,
            &parent.id,
            params.limit,
            params.offset,
        )
        .await?;
        let total_count = AnnotationCommentRepo::count_by_annotation(&state.pool, &parent.id).await?;

        Ok(Json(Envelope::success(Paginated {
            items,
            total_count,
            limit: clamp_limit(params.limit),
            offset: clamp_offset(params.offset),
        })))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// GET /threads/annotation/{annotation_id}/comment/{comment_id}/?author_email=
///
/// Single comment detail. The actor comes from the query parameter since
/// authorship is asserted, not authenticated; the same author and window
/// rules as mutation apply.
pub async fn get_comment(
    State(state): State<AppState>,
    Path((annotation_id, comment_id)): Path<(String, i64)>,
    Query(params): Query<CommentActorParams>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("get_comment")
        .annotation_id(&annotation_id)
        .comment_id(comment_id);
    let result: AppResult<_> = async {
        let author_email = required("author_email", params.author_email)?;
        validate_email("author_email", &author_email)?;

        let parent = find_parent(&state, &annotation_id).await?;
        let comment = find_actionable_comment(&state, &parent.id, comment_id, &author_email).await?;

        Ok(Json(Envelope::success(comment)))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// PATCH /threads/annotation/{annotation_id}/comment/{comment_id}/
///
/// Update a comment's text. Only the original author within 24 hours,
/// only the `text` field, and the author must still be a thread
/// participant.
pub async fn update_comment(
    State(state): State<AppState>,
    Path((annotation_id, comment_id)): Path<(String, i64)>,
    Json(input): Json<UpdateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("update_comment")
        .annotation_id(&annotation_id)
        .comment_id(comment_id);
    let result: AppResult<_> = async {
        if !input.extra.is_empty() {
            return Err(CoreError::InvalidInput(
                "Only comment text may be updated".to_string(),
            )
            .into());
        }
        let author_email = required("author_email", input.author_email)?;
        validate_email("author_email", &author_email)?;
        let text = required("text", input.text)?;
        validate_required_text("text", &text)?;

        let parent = find_parent(&state, &annotation_id).await?;
        find_actionable_comment(&state, &parent.id, comment_id, &author_email).await?;
        verify_participant(&state, &parent.email_id, &author_email).await?;

        let comment = AnnotationCommentRepo::update_text(&state.pool, &parent.id, comment_id, &text)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "comment",
                id: comment_id.to_string(),
            })?;

        tracing::info!(
            annotation_id = %parent.id,
            comment_id = comment.id,
            author_email = %author_email,
            "Comment updated"
        );

        Ok(Json(Envelope::success(comment)))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// DELETE /threads/annotation/{annotation_id}/comment/{comment_id}/?author_email=
///
/// Soft delete by the original author within the 24h window.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((annotation_id, comment_id)): Path<(String, i64)>,
    Query(params): Query<CommentActorParams>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("delete_comment")
        .annotation_id(&annotation_id)
        .comment_id(comment_id);
    let result: AppResult<_> = async {
        let author_email = required("author_email", params.author_email)?;
        validate_email("author_email", &author_email)?;

        let parent = find_parent(&state, &annotation_id).await?;
        find_actionable_comment(&state, &parent.id, comment_id, &author_email).await?;

        let deleted = AnnotationCommentRepo::soft_delete(&state.pool, &parent.id, comment_id).await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "comment",
                id: comment_id.to_string(),
            }
            .into());
        }

        tracing::info!(
            annotation_id = %parent.id,
            comment_id,
            author_email = %author_email,
            "Comment deleted"
        );

        Ok(Json(Envelope::success("Comment deleted successfully".to_string())))
    }
    .await;
    result.map_err(|err| err.context(context))
}
