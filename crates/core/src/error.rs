/// Domain-level error taxonomy shared across all crates.
///
/// Every operation failure in the service maps to exactly one of these
/// kinds; the API layer translates them into HTTP statuses and the
/// `{status: "failed", message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No {entity} found matching id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Expired(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
