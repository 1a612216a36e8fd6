//! Mock API server helpers

use rb_admin_core::auth::token_store::{MemoryTokenStore, TokenKeys};
use rb_admin_core::config::{ApiConfig, SessionConfig};
use rb_admin_core::{ApiClient, TokenStore};
use std::sync::Arc;
use wiremock::{Match, MockServer, Request};

/// API config for a mock server, with a short refresh grace
pub fn test_api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        refresh_grace_ms: 10,
        ..ApiConfig::with_base_url(server.uri())
    }
}

/// Client backed by an in-memory store, optionally holding an access token
pub fn memory_client(server: &MockServer, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_access_token(token),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::with_store(
        test_api_config(server),
        TokenKeys::default(),
        Arc::clone(&store) as Arc<dyn TokenStore>,
    )
    .expect("client should build");
    (client, store)
}

/// Client whose tokens live in its cookie jar
pub fn cookie_client(server: &MockServer) -> ApiClient {
    ApiClient::new(test_api_config(server), &SessionConfig::default())
        .expect("client should build")
}

/// Matches requests sent without an Authorization header
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}
