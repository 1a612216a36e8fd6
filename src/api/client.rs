//! Authenticated API client

use reqwest::StatusCode;
use reqwest::cookie::Jar;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::refresh::RefreshCoordinator;
use crate::api::request::{RequestBody, RequestOptions, resolve_url};
use crate::auth::token_store::{CookieTokenStore, TokenKeys, TokenStore};
use crate::config::{ApiConfig, SessionConfig};
use crate::utils::error::{ClientError, Result};
use crate::utils::logging::mask_token;

/// Body sent to the refresh endpoint
#[derive(Debug, Serialize)]
struct RefreshRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Tokens the server may return from login or refresh
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// HTTP client that attaches the bearer token and recovers from one 401
///
/// Cheap to clone; clones share the token store and the refresh state, which
/// is what makes concurrent 401s collapse into a single refresh call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    config: ApiConfig,
    keys: TokenKeys,
    store: Arc<dyn TokenStore>,
    refresh: RefreshCoordinator,
}

impl std::fmt::Debug for Inner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inner")
            .field("config", &self.config)
            .field("keys", &self.keys)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client whose tokens live in the HTTP client's own cookie jar
    pub fn new(config: ApiConfig, session: &SessionConfig) -> Result<Self> {
        let origin = url::Url::parse(&config.base_url)
            .map_err(|e| ClientError::config(format!("Invalid base_url: {}", e)))?;
        let jar = Arc::new(Jar::default());
        let store = CookieTokenStore::new(Arc::clone(&jar), origin);

        let http = Self::http_builder(&config)
            .cookie_provider(jar)
            .build()
            .map_err(|e| ClientError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::from_parts(
            http,
            config,
            TokenKeys::from(session),
            Arc::new(store),
        ))
    }

    /// Client with a caller-supplied token store
    pub fn with_store(
        config: ApiConfig,
        keys: TokenKeys,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        let http = Self::http_builder(&config)
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::from_parts(http, config, keys, store))
    }

    fn http_builder(config: &ApiConfig) -> reqwest::ClientBuilder {
        let builder = reqwest::Client::builder();
        match config.request_timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    fn from_parts(
        http: reqwest::Client,
        config: ApiConfig,
        keys: TokenKeys,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        info!("ApiClient created for {}", config.base_url);
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                keys,
                store,
                refresh: RefreshCoordinator::new(),
            }),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    pub fn token_keys(&self) -> &TokenKeys {
        &self.inner.keys
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.store.get(&self.inner.keys.access)
    }

    pub fn refresh_token_value(&self) -> Option<String> {
        self.inner.store.get(&self.inner.keys.refresh)
    }

    /// Persist tokens returned by login or refresh
    pub fn store_tokens(&self, access_token: Option<&str>, refresh_token: Option<&str>) {
        self.inner.store_tokens(access_token, refresh_token);
    }

    /// Remove both tokens
    pub fn clear_tokens(&self) {
        self.inner.store.remove(&self.inner.keys.access);
        self.inner.store.remove(&self.inner.keys.refresh);
    }

    /// Resolve a caller URL against the configured origin
    pub fn resolve(&self, url: &str) -> String {
        resolve_url(&self.inner.config.base_url, url)
    }

    /// Send a request with the current bearer token
    ///
    /// On a 401 with `retry_on_401` set, joins or starts the shared refresh.
    /// If the refresh succeeds the request is sent once more and that
    /// response is returned whatever its status; otherwise the original 401
    /// is returned. Transport failures are returned as errors and never
    /// retried.
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
        retry_on_401: bool,
    ) -> Result<reqwest::Response> {
        let url = self.resolve(url);
        let response = self.send(&url, &options).await?;

        if response.status() != StatusCode::UNAUTHORIZED || !retry_on_401 {
            return Ok(response);
        }

        debug!(%url, "Received 401, attempting token refresh");
        if !self.refresh_token().await {
            warn!(%url, "Token refresh failed, returning original 401");
            return Ok(response);
        }

        debug!(%url, "Retrying request with refreshed token");
        self.send(&url, &options).await
    }

    /// GET helper with retry enabled
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.request(url, RequestOptions::get(), true).await
    }

    /// POST a JSON body with retry enabled
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        self.request(url, RequestOptions::post().json(body)?, true)
            .await
    }

    /// Refresh the access token, sharing any refresh already in flight
    pub async fn refresh_token(&self) -> bool {
        let inner = Arc::clone(&self.inner);
        self.inner
            .refresh
            .run(move || async move { inner.refresh_once().await })
            .await
    }

    async fn send(&self, url: &str, options: &RequestOptions) -> Result<reqwest::Response> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ClientError::invalid_url(format!("{}: {}", url, e)))?;

        let mut headers = options.headers.clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = self.access_token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::auth(format!("Stored token is not a valid header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self
            .inner
            .http
            .request(options.method.clone(), parsed)
            .headers(headers);

        builder = match &options.body {
            Some(RequestBody::Json(value)) => builder.body(serde_json::to_vec(value)?),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            None => builder,
        };

        Ok(builder.send().await?)
    }
}

impl Inner {
    fn store_tokens(&self, access_token: Option<&str>, refresh_token: Option<&str>) {
        let ttl = self.config.token_ttl_days;
        if let Some(token) = access_token {
            self.store.set(&self.keys.access, token, ttl);
        }
        if let Some(token) = refresh_token {
            self.store.set(&self.keys.refresh, token, ttl);
        }
    }

    /// One refresh round-trip; callers go through the coordinator
    async fn refresh_once(&self) -> bool {
        let url = resolve_url(&self.config.base_url, &self.config.refresh_path);
        let body = RefreshRequest {
            refresh_token: self.store.get(&self.keys.refresh),
        };

        info!("Refreshing access token");
        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh request failed: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Token refresh rejected");
            return false;
        }

        let tokens = response
            .json::<TokenResponse>()
            .await
            .unwrap_or_else(|e| {
                debug!("Refresh response carried no token body: {}", e);
                TokenResponse::default()
            });

        let body_token = tokens.access_token.is_some();
        if let Some(token) = &tokens.access_token {
            debug!(token = %mask_token(token), "Refresh returned access token");
        }
        self.store_tokens(tokens.access_token.as_deref(), tokens.refresh_token.as_deref());

        // A cookie set by the server may only be visible after a short wait;
        // this is a heuristic and a longer delay under load can still miss it
        tokio::time::sleep(self.config.refresh_grace()).await;

        let refreshed = body_token || self.store.get(&self.keys.access).is_some();
        if refreshed {
            info!("Access token refreshed");
        } else {
            warn!("Refresh succeeded but no access token is available");
        }
        refreshed
    }
}
