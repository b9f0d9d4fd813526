use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use threadnote_core::CoreError;
use threadnote_labeler::LabelerApiError;
use threadnote_mail::MailApiError;

/// Identifiers of the request a failed operation belonged to.
///
/// Handlers attach this to their errors so the log line emitted before
/// the failure envelope carries the operation name and the ids involved,
/// not just the error text.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub operation: &'static str,
    pub email_id: Option<String>,
    pub annotation_id: Option<String>,
    pub comment_id: Option<i64>,
}

impl ErrorContext {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            ..Default::default()
        }
    }

    pub fn email_id(mut self, email_id: &str) -> Self {
        self.email_id = Some(email_id.to_string());
        self
    }

    pub fn annotation_id(mut self, annotation_id: &str) -> Self {
        self.annotation_id = Some(annotation_id.to_string());
        self
    }

    pub fn comment_id(mut self, comment_id: i64) -> Self {
        self.comment_id = Some(comment_id);
        self
    }
}

/// The kinds of failure a handler can produce.
///
/// Wraps [`CoreError`] for domain errors plus the database and upstream
/// client error types.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A domain-level error from `threadnote_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error from the mail provider client.
    #[error(transparent)]
    Mail(#[from] MailApiError),

    /// An error from the completion service client.
    #[error(transparent)]
    Labeler(#[from] LabelerApiError),
}

/// Application-level error type for HTTP handlers: an [`ErrorKind`] plus
/// the request context it arose in.
///
/// Implements [`IntoResponse`] to log the failure with its context and
/// produce the `{"status": "failed", "message": ...}` envelope with a
/// status code matching the error kind.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct AppError {
    kind: ErrorKind,
    context: ErrorContext,
}

impl AppError {
    /// Attach request context; the last call wins.
    pub fn context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl<E: Into<ErrorKind>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self {
            kind: err.into(),
            context: ErrorContext::default(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.kind {
            ErrorKind::Core(core) => classify_core_error(core),
            ErrorKind::Database(err) => classify_sqlx_error(err),
            ErrorKind::Mail(err) => classify_mail_error(err),
            ErrorKind::Labeler(err) => classify_labeler_error(err),
        };

        log_failure(status, &self.kind, &self.context);

        let body = json!({
            "status": "failed",
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Log a failed operation with its context before the envelope is built.
///
/// Server-side failures log at error level with the full underlying
/// error; everything else is a client-visible rejection and logs at warn.
fn log_failure(status: StatusCode, kind: &ErrorKind, context: &ErrorContext) {
    let operation = if context.operation.is_empty() {
        "request"
    } else {
        context.operation
    };

    if status.is_server_error() {
        tracing::error!(
            operation,
            email_id = context.email_id.as_deref(),
            annotation_id = context.annotation_id.as_deref(),
            comment_id = context.comment_id,
            status = status.as_u16(),
            error = %kind,
            "Operation failed"
        );
    } else {
        tracing::warn!(
            operation,
            email_id = context.email_id.as_deref(),
            annotation_id = context.annotation_id.as_deref(),
            comment_id = context.comment_id,
            status = status.as_u16(),
            error = %kind,
            "Operation failed"
        );
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        CoreError::Forbidden(_) | CoreError::Expired(_) => (StatusCode::FORBIDDEN, err.to_string()),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
        CoreError::Upstream(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        CoreError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation on the annotation primary key means the short-id
///   retry budget was exhausted and maps to 409.
/// - Other unique violations (constraint name starting with `uq_`) map
///   to 409 as duplicates.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                match db_err.constraint() {
                    Some("annotations_pkey") => {
                        return (
                            StatusCode::CONFLICT,
                            "Unable to generate a unique annotation id after multiple retries"
                                .to_string(),
                        );
                    }
                    Some("uq_annotation_comments_author") => {
                        return (
                            StatusCode::CONFLICT,
                            "A comment by this author already exists on this annotation"
                                .to_string(),
                        );
                    }
                    Some(constraint) if constraint.starts_with("uq_") => {
                        return (
                            StatusCode::CONFLICT,
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                    _ => {}
                }
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

fn classify_mail_error(err: &MailApiError) -> (StatusCode, String) {
    match err {
        MailApiError::EmptyId => (StatusCode::BAD_REQUEST, err.to_string()),
        MailApiError::NotMatched(_) => (StatusCode::NOT_FOUND, err.to_string()),
        MailApiError::Request(_) => (
            StatusCode::BAD_GATEWAY,
            "Unable to confirm email participants at this time".to_string(),
        ),
        MailApiError::MissingParticipants => (StatusCode::BAD_GATEWAY, err.to_string()),
    }
}

fn classify_labeler_error(err: &LabelerApiError) -> (StatusCode, String) {
    match err {
        LabelerApiError::InvalidInput(core) => (StatusCode::BAD_REQUEST, core.to_string()),
        LabelerApiError::Request(_) | LabelerApiError::Api { .. } | LabelerApiError::Parse(_) => (
            StatusCode::BAD_GATEWAY,
            "Error generating annotation".to_string(),
        ),
    }
}
