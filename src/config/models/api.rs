//! Remote API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin prefixed to `/api...` paths
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Token refresh endpoint
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Profile ("who am I") endpoint
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    /// Login endpoint
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Delay before re-reading the token store after a refresh, in milliseconds
    #[serde(default = "default_refresh_grace_ms")]
    pub refresh_grace_ms: u64,
    /// Lifetime of tokens written to the store, in days
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u32,
    /// Per-request timeout in seconds; unset means requests may wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_path: default_refresh_path(),
            profile_path: default_profile_path(),
            login_path: default_login_path(),
            refresh_grace_ms: default_refresh_grace_ms(),
            token_ttl_days: default_token_ttl_days(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Config pointing at a different origin, other fields default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn refresh_grace(&self) -> Duration {
        Duration::from_millis(self.refresh_grace_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
