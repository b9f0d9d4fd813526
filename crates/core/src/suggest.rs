//! Input rules for AI-assisted label suggestion.

use crate::error::CoreError;

/// Maximum length of text submitted for auto-labeling.
pub const MAX_SUGGESTION_TEXT_LEN: usize = 300;

/// Validate text before it is sent to the completion service.
///
/// Must run before any network call so oversized or empty input never
/// reaches the upstream API.
pub fn validate_suggestion_text(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::InvalidInput(
            "Please provide a text to create an annotation".to_string(),
        ));
    }
    if text.chars().count() > MAX_SUGGESTION_TEXT_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Text cannot exceed {MAX_SUGGESTION_TEXT_LEN} characters"
        )));
    }
    Ok(())
}
