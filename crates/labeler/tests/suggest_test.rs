//! Integration tests for the completion client against a mock service.

use threadnote_labeler::{LabelerApi, LabelerApiError, LabelerConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: String) -> LabelerConfig {
    LabelerConfig {
        base_url,
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        max_tokens: 200,
        request_timeout_secs: 5,
    }
}

fn completion_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"text": text, "index": 0, "finish_reason": "stop"}],
    })
}

#[tokio::test]
async fn suggest_parses_completion_into_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(
            serde_json::json!({"model": "test-model", "max_tokens": 200}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Category: Task, Annotation: check budget; Category: Deadline, Annotation: by Friday",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let api = LabelerApi::new(config(server.uri())).unwrap();
    let suggestions = api.suggest("check budget by Friday").await.unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].category, "Task");
    assert_eq!(suggestions[0].annotation, "check budget");
    assert_eq!(suggestions[1].category, "Deadline");
}

#[tokio::test]
async fn oversized_text_rejected_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted on purpose: validation must fail before any call.
    let api = LabelerApi::new(config(server.uri())).unwrap();
    let err = api.suggest(&"a".repeat(301)).await.unwrap_err();
    assert!(matches!(err, LabelerApiError::InvalidInput(_)));
}

#[tokio::test]
async fn empty_text_rejected_before_any_request() {
    let server = MockServer::start().await;
    let api = LabelerApi::new(config(server.uri())).unwrap();
    let err = api.suggest("").await.unwrap_err();
    assert!(matches!(err, LabelerApiError::InvalidInput(_)));
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let api = LabelerApi::new(config(server.uri())).unwrap();
    let err = api.suggest("check budget").await.unwrap_err();
    match err {
        LabelerApiError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_completion_is_an_error_not_a_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("I cannot categorize this")),
        )
        .mount(&server)
        .await;

    let api = LabelerApi::new(config(server.uri())).unwrap();
    let err = api.suggest("check budget").await.unwrap_err();
    assert!(matches!(err, LabelerApiError::Parse(_)));
}
