//! Annotation comment row model and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `annotation_comments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnnotationComment {
    pub id: i64,
    pub annotation_id: String,
    pub text: String,
    pub author_email: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a comment on an annotation.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotationComment {
    pub author_email: String,
    pub text: String,
}

