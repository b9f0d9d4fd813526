//! Handler for AI-assisted annotation suggestion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppResult, ErrorContext};
use crate::handlers::required;
use crate::response::Envelope;
use crate::state::AppState;

/// Request body for auto-labeling a piece of text.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub text: Option<String>,
}

/// POST /threads/annotation/
///
/// Submit free text to the completion service and return advisory
/// category/annotation pairs. Nothing is persisted; input length is
/// validated before any upstream call.
pub async fn auto_annotate(
    State(state): State<AppState>,
    Json(input): Json<SuggestRequest>,
) -> AppResult<impl IntoResponse> {
    let context = ErrorContext::new("auto_annotate");
    let result: AppResult<_> = async {
        let text = required("text", input.text)?;

        let suggestions = state.labeler.suggest(&text).await?;

        tracing::info!(
            suggestion_count = suggestions.len(),
            "Auto-annotation suggestions generated"
        );

        Ok((StatusCode::CREATED, Json(Envelope::success(suggestions))))
    }
    .await;
    result.map_err(|err| err.context(context))
}
