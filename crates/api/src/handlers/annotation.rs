//! Handlers for thread-scoped annotation CRUD.
//!
//! Each handler runs its fallible body inside an async block and tags
//! any failure with an [`ErrorContext`] so the operation and ids appear
//! in the failure log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use threadnote_core::pagination::{clamp_limit, clamp_offset};
use threadnote_core::validation::{
    validate_email, validate_email_id, validate_position, validate_required_text,
};
use threadnote_core::{AnnotationLabel, CoreError};
use threadnote_db::models::annotation::{
    AnnotationListParams, CreateAnnotation, UpdateAnnotation,
};
use threadnote_db::repositories::AnnotationRepo;

use crate::error::{AppResult, ErrorContext};
use crate::handlers::{required, verify_participant};
use crate::response::{Envelope, Paginated};
use crate::state::AppState;

/// Request body for creating an annotation. Fields are optional so
/// missing ones surface as precise `InvalidInput` messages rather than
/// deserialization failures.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotationRequest {
    pub user_email: Option<String>,
    pub text: Option<String>,
    pub annotation_label: Option<String>,
    pub position: Option<String>,
}

/// Request body for partially updating an annotation. `user_email` is
/// the acting participant; the remaining fields are optional updates.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnotationRequest {
    pub user_email: Option<String>,
    pub text: Option<String>,
    pub position: Option<String>,
    pub annotation_label: Option<String>,
}

/// Query parameters identifying the acting participant on a delete.
#[derive(Debug, Deserialize)]
pub struct ActorParams {
    pub user_email: Option<String>,
}

/// GET /threads/{email_id}/annotation/
///
/// List non-deleted annotations for a thread, newest first. An empty
/// thread yields an empty page, not an error.
pub async fn list_annotations(
    State(state): State<AppState>,
    Path(email_id): Path<String>,
    Query(params): Query<AnnotationListParams>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("list_annotations").email_id(&email_id);
    let result: AppResult<_> = async {
        validate_email_id(&email_id)?;

        let items = AnnotationRepo::list(&state.pool, &email_id, &params).await?;
        let total_count = AnnotationRepo::count(&state.pool, &email_id, &params).await?;

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

/// POST /threads/{email_id}/annotation/
///
/// Create an annotation on a thread. The annotator must be a thread
/// participant; the short id is generated with collision retry.
pub async fn create_annotation(
    State(state): State<AppState>,
    Path(email_id): Path<String>,
    Json(input): Json<CreateAnnotationRequest>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("create_annotation").email_id(&email_id);
    let result: AppResult<_> = async {
        validate_email_id(&email_id)?;

        let user_email = required("user_email", input.user_email)?;
        validate_email("user_email", &user_email)?;
        let text = required("text", input.text)?;
        validate_required_text("text", &text)?;
        let position = required("position", input.position)?;
        validate_position(&position)?;
        let label = AnnotationLabel::parse(&required("annotation_label", input.annotation_label)?)?;

        verify_participant(&state, &email_id, &user_email).await?;

        let annotation = AnnotationRepo::create(
            &state.pool,
            &email_id,
            &CreateAnnotation {
                user_email,
                text,
                annotation_label: label.as_str().to_string(),
                position,
            },
        )
        .await?;

        tracing::info!(
            email_id = %email_id,
            annotation_id = %annotation.id,
            user_email = %annotation.user_email,
            "Annotation created"
        );

        Ok((StatusCode::CREATED, Json(Envelope::success(annotation))))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// GET /threads/{email_id}/annotation/{annotation_id}/
pub async fn get_annotation(
    State(state): State<AppState>,
    Path((email_id, annotation_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("get_annotation")
        .email_id(&email_id)
        .annotation_id(&annotation_id);
    let result: AppResult<_> = async {
        validate_email_id(&email_id)?;

        let annotation = AnnotationRepo::find(&state.pool, &email_id, &annotation_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "annotation",
                id: annotation_id,
            })?;

        Ok(Json(Envelope::success(annotation)))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// PATCH /threads/{email_id}/annotation/{annotation_id}/
///
/// Partial update; the acting participant comes from `user_email` in the
/// body and must belong to the thread.
pub async fn update_annotation(
    State(state): State<AppState>,
    Path((email_id, annotation_id)): Path<(String, String)>,
    Json(input): Json<UpdateAnnotationRequest>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("update_annotation")
        .email_id(&email_id)
        .annotation_id(&annotation_id);
    let result: AppResult<_> = async {
        validate_email_id(&email_id)?;

        let user_email = required("user_email", input.user_email)?;
        validate_email("user_email", &user_email)?;
        if let Some(ref text) = input.text {
            validate_required_text("text", text)?;
        }
        if let Some(ref position) = input.position {
            validate_position(position)?;
        }
        let annotation_label = input
            .annotation_label
            .as_deref()
            .map(AnnotationLabel::parse)
            .transpose()?
            .map(|label| label.as_str().to_string());

        verify_participant(&state, &email_id, &user_email).await?;

        let annotation = AnnotationRepo::update(
            &state.pool,
            &email_id,
            &annotation_id,
            &UpdateAnnotation {
                text: input.text,
                position: input.position,
                annotation_label,
            },
        )
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "annotation",
            id: annotation_id.clone(),
        })?;

        tracing::info!(
            email_id = %email_id,
            annotation_id = %annotation.id,
            user_email = %user_email,
            "Annotation updated"
        );

        Ok(Json(Envelope::success(annotation)))
    }
    .await;
    result.map_err(|err| err.context(context))
}

/// DELETE /threads/{email_id}/annotation/{annotation_id}/?user_email=
///
/// Soft delete. Gated on thread participation like every other write;
/// the actor is taken from the `user_email` query parameter.
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path((email_id, annotation_id)): Path<(String, String)>,
    Query(params): Query<ActorParams>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("delete_annotation")
        .email_id(&email_id)
        .annotation_id(&annotation_id);
    let result: AppResult<_> = async {
        validate_email_id(&email_id)?;

        let user_email = required("user_email", params.user_email)?;
        validate_email("user_email", &user_email)?;

        verify_participant(&state, &email_id, &user_email).await?;

        let deleted = AnnotationRepo::soft_delete(&state.pool, &email_id, &annotation_id).await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "annotation",
                id: annotation_id,
            }
            .into());
        }

        tracing::info!(
            email_id = %email_id,
            annotation_id = %annotation_id,
            user_email = %user_email,
            "Annotation deleted"
        );

        Ok(Json(Envelope::success(format!(
            "Annotation with id {annotation_id} has been deleted successfully"
        ))))
    }
    .await;
    result.map_err(|err| err.context(context))
}
