//! Annotation row model and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `annotations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Annotation {
    /// 8-character base58 short id, immutable once assigned.
    pub id: String,
    /// External email/thread id this annotation belongs to.
    pub email_id: String,
    pub text: String,
    /// Opaque positional marker within the source email.
    pub position: String,
    /// Annotator address; verified against the thread participants at
    /// write time, never authenticated.
    pub user_email: String,
    pub annotation_label: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new annotation.
#[derive(Debug, Deserialize)]
pub struct CreateAnnotation {
    pub user_email: String,
    pub text: String,
    pub annotation_label: String,
    pub position: String,
}

/// DTO for partially updating an annotation; absent fields are left as-is.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnotation {
    pub text: Option<String>,
    pub position: Option<String>,
    pub annotation_label: Option<String>,
}

/// Filters and pagination for annotation listing.
#[derive(Debug, Default, Deserialize)]
pub struct AnnotationListParams {
    pub user_email: Option<String>,
    pub annotation_label: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// Free-text search over user_email, annotation_label, text, position.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
