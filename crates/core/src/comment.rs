//! Mutation rules for annotation comments.
//!
//! A comment may only be edited or deleted by its original author, and
//! only within 24 hours of creation. Both checks are pure so the edit
//! window boundary can be tested with fixed timestamps.

use chrono::{DateTime, Duration, Utc};

use crate::error::CoreError;

/// Window after creation during which a comment may be edited or deleted.
pub fn comment_edit_window() -> Duration {
    Duration::hours(24)
}

/// Reject mutation of a comment older than the edit window.
///
/// A comment exactly at the boundary (`now - created_at == 24h`) is still
/// mutable; one second past it is not.
pub fn check_comment_window(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), CoreError> {
    if now - created_at > comment_edit_window() {
        return Err(CoreError::Expired(
            "Comments cannot be acted on after 24 hours".to_string(),
        ));
    }
    Ok(())
}

/// Reject mutation by anyone other than the comment's author.
pub fn check_comment_author(author_email: &str, actor_email: &str) -> Result<(), CoreError> {
    if author_email != actor_email {
        return Err(CoreError::Forbidden("Permission denied".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs_after_creation: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        (created, created + Duration::seconds(secs_after_creation))
    }

    #[test]
    fn mutation_allowed_just_inside_window() {
        let (created, now) = at(24 * 3600 - 1);
        assert!(check_comment_window(created, now).is_ok());
    }

    #[test]
    fn mutation_allowed_exactly_at_window() {
        let (created, now) = at(24 * 3600);
        assert!(check_comment_window(created, now).is_ok());
    }

    #[test]
    fn mutation_rejected_just_past_window() {
        let (created, now) = at(24 * 3600 + 1);
        let err = check_comment_window(created, now).unwrap_err();
        assert!(matches!(err, CoreError::Expired(_)));
    }

    #[test]
    fn author_mismatch_is_forbidden() {
        let err = check_comment_author("a@x.com", "b@x.com").unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[test]
    fn author_match_is_allowed() {
        assert!(check_comment_author("a@x.com", "a@x.com").is_ok());
    }
}
