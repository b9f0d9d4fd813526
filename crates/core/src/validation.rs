//! Field-level input validation shared by the API handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum stored length of an external email/thread id.
pub const MAX_EMAIL_ID_LEN: usize = 20;

/// Maximum stored length of an annotation position marker.
pub const MAX_POSITION_LEN: usize = 255;

/// Validate an actor email address (`user_email` / `author_email`).
///
/// The address is not authenticated; it only has to be well-formed here,
/// participant membership is checked separately against the thread.
pub fn validate_email(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} is required")));
    }
    if !value.validate_email() {
        return Err(CoreError::InvalidInput(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate the external email/thread id path parameter.
pub fn validate_email_id(email_id: &str) -> Result<(), CoreError> {
    if email_id.is_empty() {
        return Err(CoreError::InvalidInput("Email id must be provided".to_string()));
    }
    if email_id.len() > MAX_EMAIL_ID_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Email id cannot exceed {MAX_EMAIL_ID_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject an empty required text field.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// Validate an annotation position marker.
pub fn validate_position(position: &str) -> Result<(), CoreError> {
    validate_required_text("position", position)?;
    if position.len() > MAX_POSITION_LEN {
        return Err(CoreError::InvalidInput(format!(
            "position cannot exceed {MAX_POSITION_LEN} characters"
        )));
    }
    Ok(())
}
