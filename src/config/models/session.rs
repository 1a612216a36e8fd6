//! Session and token persistence configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name under which the access token is persisted
    #[serde(default = "default_access_cookie")]
    pub access_cookie: String,
    /// Name under which the refresh token is persisted
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie: String,
    /// File holding the cached profile between runs
    #[serde(default)]
    pub profile_cache_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie: default_access_cookie(),
            refresh_cookie: default_refresh_cookie(),
            profile_cache_file: None,
        }
    }
}
