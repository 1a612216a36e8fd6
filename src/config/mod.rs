//! Configuration management for the admin client
//!
//! Configuration is read from a YAML file or from `RB_ADMIN_*` environment
//! variables. Every field has a default, so an empty file is a valid
//! configuration that talks to the compiled-in origin.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct for the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Token and profile persistence
    #[serde(default)]
    pub session: SessionConfig,
    /// Optional YAML file replacing the built-in access tables
    #[serde(default)]
    pub policy_file: Option<PathBuf>,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| ClientError::config(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("RB_ADMIN_BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Some(grace) = lookup("RB_ADMIN_REFRESH_GRACE_MS") {
            config.api.refresh_grace_ms = grace
                .parse()
                .map_err(|e| ClientError::config(format!("Invalid refresh grace: {}", e)))?;
        }
        if let Some(timeout) = lookup("RB_ADMIN_TIMEOUT_SECS") {
            config.api.request_timeout_secs = Some(
                timeout
                    .parse()
                    .map_err(|e| ClientError::config(format!("Invalid timeout: {}", e)))?,
            );
        }
        if let Some(ttl) = lookup("RB_ADMIN_TOKEN_TTL_DAYS") {
            config.api.token_ttl_days = ttl
                .parse()
                .map_err(|e| ClientError::config(format!("Invalid token ttl: {}", e)))?;
        }
        if let Some(path) = lookup("RB_ADMIN_POLICY_FILE") {
            config.policy_file = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("RB_ADMIN_PROFILE_CACHE") {
            config.session.profile_cache_file = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup("RB_ADMIN_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = lookup("RB_ADMIN_LOG_JSON") {
            config.logging.json = json
                .parse()
                .map_err(|e| ClientError::config(format!("Invalid log json flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .validate()
            .map_err(|e| ClientError::config(format!("API config error: {}", e)))?;

        self.session
            .validate()
            .map_err(|e| ClientError::config(format!("Session config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| ClientError::config(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}
