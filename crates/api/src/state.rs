use std::sync::Arc;

use threadnote_labeler::LabelerApi;
use threadnote_mail::MailApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: threadnote_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Mail provider client (participant lookup).
    pub mail: Arc<MailApi>,
    /// Completion service client (label suggestion).
    pub labeler: Arc<LabelerApi>,
}
