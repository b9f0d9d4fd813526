pub mod annotation;
pub mod comment;
pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/threads` route tree.
///
/// ```text
/// GET|POST          /threads/{email_id}/annotation/
/// GET|PATCH|DELETE  /threads/{email_id}/annotation/{annotation_id}/
/// POST              /threads/annotation/                      auto-labeling
/// GET|POST          /threads/annotation/{annotation_id}/comment/
/// GET|PATCH|DELETE  /threads/annotation/{annotation_id}/comment/{comment_id}/
/// ```
///
/// The static `/threads/annotation` prefix takes priority over the
/// `{email_id}` parameter, matching the consumed contract.
pub fn thread_routes() -> Router<AppState> {
    Router::new()
        .merge(annotation::router())
        .merge(comment::router())
        .route("/threads/annotation/", post(handlers::suggest::auto_annotate))
}
