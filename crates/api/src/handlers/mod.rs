pub mod annotation;
pub mod comment;
pub mod suggest;

use threadnote_core::CoreError;

use crate::error::AppResult;
use crate::state::AppState;

/// Verify that an actor belongs to a thread's participant set.
///
/// Every write on an annotation or its comments goes through this gate,
/// including deletes.
pub(crate) async fn verify_participant(
    state: &AppState,
    email_id: &str,
    actor_email: &str,
) -> AppResult<()> {
    let participants = state.mail.fetch_participants(email_id).await?;
    if !participants.contains(actor_email) {
        return Err(CoreError::Forbidden(
            "Annotator email address not a part of this email thread".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Unwrap a required request field or fail with `InvalidInput`.
pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, CoreError> {
    value.ok_or_else(|| CoreError::InvalidInput(format!("{field} is required")))
}
