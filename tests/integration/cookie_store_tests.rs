//! Tokens kept in the client's cookie jar

use crate::common::{REFRESH_PATH, cookie_client};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENTS: &str = "/api/v1/agents";

#[tokio::test]
async fn test_stored_token_visible_to_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AGENTS))
        .and(header("authorization", "Bearer jar-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = cookie_client(&server);
    client.store_tokens(Some("jar-token"), None);

    assert_eq!(client.access_token().as_deref(), Some("jar-token"));
    assert_eq!(client.get(AGENTS).await.unwrap().status(), 200);
}

#[tokio::test]
async fn test_server_set_cookie_counts_as_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(AGENTS))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(AGENTS))
        .and(header("authorization", "Bearer from-cookie"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "rb_admin_token=from-cookie; Path=/")
                .set_body_string("ok"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = cookie_client(&server);
    client.store_tokens(Some("stale"), None);

    let response = client.get(AGENTS).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(client.access_token().as_deref(), Some("from-cookie"));
}

#[tokio::test]
async fn test_clear_tokens_expires_cookies() {
    let server = MockServer::start().await;
    let client = cookie_client(&server);

    client.store_tokens(Some("access"), Some("refresh"));
    assert_eq!(client.refresh_token_value().as_deref(), Some("refresh"));

    client.clear_tokens();
    assert!(client.access_token().is_none());
    assert!(client.refresh_token_value().is_none());
}
