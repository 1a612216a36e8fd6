//! Token attachment, refresh-on-401 and the single retry

use crate::common::fixtures::token_json;
use crate::common::{NoAuthorization, REFRESH_PATH, memory_client};
use futures::future::join_all;
use rb_admin_core::auth::token_store::TokenKeys;
use rb_admin_core::config::ApiConfig;
use rb_admin_core::{ApiClient, ClientError, MemoryTokenStore, RequestOptions};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHATS: &str = "/api/v1/chats";

#[tokio::test]
async fn test_bearer_token_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(header("authorization", "Bearer abc"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let response = client.get(CHATS).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_no_token_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, None);
    let response = client.get(CHATS).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_caller_content_type_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notes"))
        .and(header("content-type", "text/plain"))
        .and(header("x-trace", "42"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let options = RequestOptions::post()
        .header("content-type", "text/plain")
        .unwrap()
        .header("x-trace", "42")
        .unwrap()
        .text("note");
    let response = client.request("/api/v1/notes", options, true).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_json_body_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects"))
        .and(body_json(serde_json::json!({"name": "alpha"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let response = client
        .post_json("/api/v1/projects", &serde_json::json!({"name": "alpha"}))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_absolute_url_not_rewritten() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/external/status"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    // Configured origin differs from the mock server
    let other = MockServer::start().await;
    let (client, _) = memory_client(&other, None);

    let url = format!("{}/external/status", server.uri());
    let response = client.get(&url).await.unwrap();
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_refresh_then_retry_with_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("new", None)))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("old"));
    let response = client.get(CHATS).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(client.access_token().as_deref(), Some("new"));
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_json("new", None))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("old"));
    let requests = (0..5).map(|_| {
        let client = client.clone();
        async move { client.get(CHATS).await }
    });

    let responses = join_all(requests).await;
    for response in responses {
        assert_eq!(response.unwrap().status(), 200);
    }
}

#[tokio::test]
async fn test_retry_happens_at_most_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("new", None)))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("old"));
    let response = client.get(CHATS).await.unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_retry_disabled_skips_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("new", None)))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("old"));
    let response = client
        .request(CHATS, RequestOptions::get(), false)
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_failed_refresh_returns_original_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("old"));
    let response = client.get(CHATS).await.unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "expired");
    assert_eq!(client.access_token().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_refresh_sends_stored_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(body_json(serde_json::json!({"refresh_token": "r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("a2", Some("r2"))))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, None);
    client.store_tokens(None, Some("r1"));

    assert!(client.refresh_token().await);
    assert_eq!(client.access_token().as_deref(), Some("a2"));
    assert_eq!(client.refresh_token_value().as_deref(), Some("r2"));
}

#[tokio::test]
async fn test_non_401_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHATS))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = memory_client(&server, Some("abc"));
    let response = client.get(CHATS).await.unwrap();
    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_error() {
    // Nothing listens on port 1
    let client = ApiClient::with_store(
        ApiConfig::with_base_url("http://127.0.0.1:1"),
        TokenKeys::default(),
        Arc::new(MemoryTokenStore::with_access_token("abc")),
    )
    .unwrap();

    let err = client.get(CHATS).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(err.is_transport_error());
}
