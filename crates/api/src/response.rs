//! Shared response envelope types for API handlers.
//!
//! Every success response is `{"status": "success", "data": <payload>}`;
//! failures are produced by `AppError` as `{"status": "failed",
//! "message": <string>}`. Use [`Envelope`] instead of ad-hoc
//! `serde_json::json!` so the shape stays consistent.

use serde::Serialize;

/// Standard `{"status": "success", "data": T}` success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// Paginated list payload carried inside the success envelope.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}
