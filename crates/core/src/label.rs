//! The closed set of annotation labels.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Categorical tag applied to an annotation.
///
/// The wire strings are fixed: changing them would break stored rows and
/// the categorization prompt sent to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationLabel {
    #[serde(rename = "task")]
    Task,
    #[serde(rename = "meeting_request")]
    MeetingRequest,
    #[serde(rename = "follow-up")]
    FollowUp,
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "deadline")]
    Deadline,
    #[serde(rename = "approval")]
    Approval,
    #[serde(rename = "feedback")]
    Feedback,
    #[serde(rename = "review")]
    Review,
}

/// All valid annotation label strings, in wire form.
pub const VALID_LABEL_STRINGS: &[&str] = &[
    "task",
    "meeting_request",
    "follow-up",
    "question",
    "deadline",
    "approval",
    "feedback",
    "review",
];

impl AnnotationLabel {
    /// Return the label as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::MeetingRequest => "meeting_request",
            Self::FollowUp => "follow-up",
            Self::Question => "question",
            Self::Deadline => "deadline",
            Self::Approval => "approval",
            Self::Feedback => "feedback",
            Self::Review => "review",
        }
    }

    /// Parse a label from its wire string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "task" => Ok(Self::Task),
            "meeting_request" => Ok(Self::MeetingRequest),
            "follow-up" => Ok(Self::FollowUp),
            "question" => Ok(Self::Question),
            "deadline" => Ok(Self::Deadline),
            "approval" => Ok(Self::Approval),
            "feedback" => Ok(Self::Feedback),
            "review" => Ok(Self::Review),
            _ => Err(CoreError::InvalidInput(format!(
                "Invalid annotation label '{s}'. Must be one of: {}",
                VALID_LABEL_STRINGS.join(", ")
            ))),
        }
    }
}
