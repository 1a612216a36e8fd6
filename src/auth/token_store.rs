//! Credential persistence
//!
//! The API client only needs "an opaque string persisted across calls" under
//! two fixed names. [`CookieTokenStore`] keeps them in the same cookie jar the
//! HTTP client uses, so a token the server sets through `Set-Cookie` is seen
//! by the next read. [`MemoryTokenStore`] is the in-process alternative.

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::SessionConfig;
use crate::utils::logging::mask_token;

/// Names under which the two tokens are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKeys {
    pub access: String,
    pub refresh: String,
}

impl Default for TokenKeys {
    fn default() -> Self {
        Self {
            access: "rb_admin_token".to_string(),
            refresh: "refresh_token".to_string(),
        }
    }
}

impl From<&SessionConfig> for TokenKeys {
    fn from(config: &SessionConfig) -> Self {
        Self {
            access: config.access_cookie.clone(),
            refresh: config.refresh_cookie.clone(),
        }
    }
}

/// Key-value credential storage
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str, ttl_days: u32);

    fn remove(&self, key: &str);
}

/// Cookie-jar backed store
///
/// Cookies are scoped to `origin`, which must be the origin API requests are
/// sent to for server-set cookies to be visible here.
#[derive(Debug, Clone)]
pub struct CookieTokenStore {
    jar: Arc<Jar>,
    origin: Url,
}

impl CookieTokenStore {
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }

    /// Jar to hand to `reqwest::ClientBuilder::cookie_provider`
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        let header = self.jar.cookies(&self.origin)?;
        let header = header.to_str().ok()?;

        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    fn set(&self, key: &str, value: &str, ttl_days: u32) {
        debug!(key, value = %mask_token(value), ttl_days, "Storing cookie");
        let max_age = u64::from(ttl_days) * 24 * 60 * 60;
        self.jar.add_cookie_str(
            &format!("{}={}; Max-Age={}; Path=/", key, value, max_age),
            &self.origin,
        );
    }

    fn remove(&self, key: &str) {
        debug!(key, "Expiring cookie");
        self.jar
            .add_cookie_str(&format!("{}=; Max-Age=0; Path=/", key), &self.origin);
    }
}

/// In-memory store; TTLs are not enforced
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an access token
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        store.set(&TokenKeys::default().access, token, 1);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str, _ttl_days: u32) {
        self.values.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}
