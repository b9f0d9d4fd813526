//! Integration tests for the message participant lookup, using a mock
//! mail provider.

use threadnote_mail::{MailApi, MailApiError, MailConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: String) -> MailConfig {
    MailConfig {
        base_url,
        auth_token: "test-token".to_string(),
        connect_timeout_secs: 5,
        request_timeout_secs: 5,
    }
}

fn message_body(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "from": [{"name": "Alice", "email": "a@x.com"}],
        "to": [{"name": "Bob", "email": "b@x.com"}],
        "cc": [{"name": "Carol", "email": "c@x.com"}],
    })
}

#[tokio::test]
async fn participants_are_the_union_of_from_to_and_cc() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_body("msg-1")))
        .expect(1)
        .mount(&server)
        .await;

    let api = MailApi::new(config(server.uri())).unwrap();
    let participants = api.fetch_participants("msg-1").await.unwrap();

    assert_eq!(participants.len(), 3);
    assert!(participants.contains("a@x.com"));
    assert!(participants.contains("b@x.com"));
    assert!(participants.contains("c@x.com"));
    assert!(!participants.contains("d@x.com"));
}

#[tokio::test]
async fn empty_id_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and surface as NotMatched,
    // but the empty id must be rejected before the request is sent.
    let api = MailApi::new(config(server.uri())).unwrap();
    let err = api.fetch_participants("").await.unwrap_err();
    assert!(matches!(err, MailApiError::EmptyId));
}

#[tokio::test]
async fn provider_error_body_is_not_matched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Couldn't find message"})),
        )
        .mount(&server)
        .await;

    let api = MailApi::new(config(server.uri())).unwrap();
    let err = api.fetch_participants("missing").await.unwrap_err();
    match err {
        MailApiError::NotMatched(msg) => assert_eq!(msg, "Couldn't find message"),
        other => panic!("expected NotMatched, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_not_matched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let api = MailApi::new(config(server.uri())).unwrap();
    let err = api.fetch_participants("broken").await.unwrap_err();
    match err {
        MailApiError::NotMatched(msg) => assert_eq!(msg, "Unable to confirm email id"),
        other => panic!("expected NotMatched, got {other:?}"),
    }
}

#[tokio::test]
async fn id_mismatch_is_not_matched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_body("other-id")))
        .mount(&server)
        .await;

    let api = MailApi::new(config(server.uri())).unwrap();
    let err = api.fetch_participants("msg-2").await.unwrap_err();
    assert!(matches!(err, MailApiError::NotMatched(_)));
}

#[tokio::test]
async fn message_without_participants_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/msg-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg-3",
            "from": [],
            "to": [],
        })))
        .mount(&server)
        .await;

    let api = MailApi::new(config(server.uri())).unwrap();
    let err = api.fetch_participants("msg-3").await.unwrap_err();
    assert!(matches!(err, MailApiError::MissingParticipants));
}
