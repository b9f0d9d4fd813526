//! Route definitions for annotation comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Comment routes scoped to an annotation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/threads/annotation/{annotation_id}/comment/",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/threads/annotation/{annotation_id}/comment/{comment_id}/",
            get(comment::get_comment)
                .patch(comment::update_comment)
                .delete(comment::delete_comment),
        )
}
