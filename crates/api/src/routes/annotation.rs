//! Route definitions for thread-scoped annotations.

use axum::routing::get;
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Annotation routes scoped to an email thread.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/threads/{email_id}/annotation/",
            get(annotation::list_annotations).post(annotation::create_annotation),
        )
        .route(
            "/threads/{email_id}/annotation/{annotation_id}/",
            get(annotation::get_annotation)
                .patch(annotation::update_annotation)
                .delete(annotation::delete_annotation),
        )
}
