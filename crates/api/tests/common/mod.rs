//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the application router exactly as `main.rs` does (same
//! middleware stack via `build_app_router`), with the two upstream APIs
//! pointed at wiremock servers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use threadnote_api::config::ServerConfig;
use threadnote_api::router::build_app_router;
use threadnote_api::state::AppState;
use threadnote_labeler::{LabelerApi, LabelerConfig};
use threadnote_mail::{MailApi, MailConfig};

/// Build a test `ServerConfig` pointing both upstream clients at the
/// given base URLs.
pub fn test_config(mail_url: &str, labeler_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        mail: MailConfig {
            base_url: mail_url.to_string(),
            auth_token: "test-token".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 5,
        },
        labeler: LabelerConfig {
            base_url: labeler_url.to_string(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            max_tokens: 200,
            request_timeout_secs: 5,
        },
    }
}

/// Build the full application router against the given pool and mock
/// upstream URLs.
pub fn build_test_app(pool: PgPool, mail_url: &str, labeler_url: &str) -> Router {
    let config = test_config(mail_url, labeler_url);
    let mail = MailApi::new(config.mail.clone()).expect("mail client");
    let labeler = LabelerApi::new(config.labeler.clone()).expect("labeler client");

    let state = AppState {
        pool,
        config: Arc::new(config),
        mail: Arc::new(mail),
        labeler: Arc::new(labeler),
    };

    build_app_router(state)
}

/// Mount a message lookup on the mail mock: the first participant is the
/// sender, the second the recipient, the rest go on cc.
pub async fn mount_message(server: &MockServer, email_id: &str, participants: &[&str]) {
    let from = serde_json::json!([{"email": participants[0]}]);
    let to = participants
        .get(1)
        .map(|p| serde_json::json!([{"email": p}]))
        .unwrap_or_else(|| serde_json::json!([]));
    let cc: Vec<_> = participants[2.min(participants.len())..]
        .iter()
        .map(|p| serde_json::json!({"email": p}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/messages/{email_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": email_id,
            "from": from,
            "to": to,
            "cc": cc,
        })))
        .mount(server)
        .await;
}

/// Mount a message lookup that fails with a provider error body.
pub async fn mount_missing_message(server: &MockServer, email_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/messages/{email_id}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Couldn't find message"})),
        )
        .mount(server)
        .await;
}

async fn request(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    app.oneshot(request).await.expect("response")
}

pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    request(app, Method::DELETE, uri, None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
