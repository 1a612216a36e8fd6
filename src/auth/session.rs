//! Logged-in user state
//!
//! A [`Session`] ties the API client to the access policy: it logs in, keeps
//! the current [`Profile`], and answers policy questions for that profile.
//! The profile can be cached on disk so a later process can restore it
//! without another round-trip.

use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::profile::Profile;
use super::rbac::{AccessPolicy, HttpMethod};
use crate::api::{ApiClient, RequestOptions, TokenResponse};
use crate::config::SessionConfig;
use crate::utils::error::{ClientError, Result};

/// Profile cache file name used when none is configured
pub const DEFAULT_PROFILE_CACHE_FILE: &str = "rb_admin_profile.json";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Current user, their tokens and the policy that applies to them
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
    policy: Arc<AccessPolicy>,
    profile: RwLock<Option<Profile>>,
    cache_file: Option<PathBuf>,
}

impl Session {
    /// Session without an on-disk profile cache
    pub fn new(client: ApiClient, policy: Arc<AccessPolicy>) -> Self {
        Self {
            client,
            policy,
            profile: RwLock::new(None),
            cache_file: None,
        }
    }

    /// Session whose cache location comes from configuration
    pub fn from_config(client: ApiClient, policy: Arc<AccessPolicy>, config: &SessionConfig) -> Self {
        let cache_file = config
            .profile_cache_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_CACHE_FILE));
        Self::new(client, policy).with_profile_cache(cache_file)
    }

    /// Persist the profile to `path` after each successful fetch
    pub fn with_profile_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(path.into());
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    /// Profile of the current user, if any
    pub fn profile(&self) -> Option<Profile> {
        self.profile.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.read().is_some()
    }

    /// Exchange credentials for tokens and load the profile
    ///
    /// The login call itself is never retried through a refresh.
    pub async fn login(&self, username: &str, password: &str) -> Result<Profile> {
        info!(username, "Logging in");
        let options = RequestOptions::post().json(&LoginRequest { username, password })?;
        let response = self
            .client
            .request(&self.client.config().login_path, options, false)
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(username, "Login rejected");
            return Err(ClientError::auth("Invalid credentials"));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), message));
        }

        let tokens = response.json::<TokenResponse>().await.unwrap_or_else(|e| {
            debug!("Login response carried no token body: {}", e);
            TokenResponse::default()
        });
        self.client
            .store_tokens(tokens.access_token.as_deref(), tokens.refresh_token.as_deref());

        self.fetch_profile().await
    }

    /// Load the profile of the token holder
    ///
    /// A 401 that survives the refresh attempt ends the session.
    pub async fn fetch_profile(&self) -> Result<Profile> {
        let response = self.client.get(&self.client.config().profile_path).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Profile request unauthorized, clearing session");
            self.clear_local().await?;
            return Err(ClientError::unauthorized("Session expired"));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), message));
        }

        let profile: Profile = response.json().await?;
        debug!(department = ?profile.department, role = ?profile.role, "Profile loaded");

        *self.profile.write() = Some(profile.clone());
        self.save_cache(&profile).await?;
        Ok(profile)
    }

    /// Reload a previously cached profile
    ///
    /// Returns `None` when no cache is configured or the file does not exist.
    pub async fn restore(&self) -> Result<Option<Profile>> {
        let Some(path) = &self.cache_file else {
            return Ok(None);
        };

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let profile: Profile = serde_json::from_str(&content)?;
        debug!(path = ?path, "Restored cached profile");
        *self.profile.write() = Some(profile.clone());
        Ok(Some(profile))
    }

    /// Forget tokens and the cached profile
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.clear_local().await
    }

    /// Whether the current user may see `path`
    pub fn can_access(&self, path: &str) -> bool {
        let profile = self.profile.read();
        let (department, role) = match profile.as_ref() {
            Some(p) => (p.department, p.role),
            None => (None, None),
        };
        self.policy.can_access_feature(path, department, role)
    }

    /// Whether the current user may use `method` on `feature`
    pub fn can_use(&self, feature: &str, method: HttpMethod) -> bool {
        match self.profile.read().as_ref() {
            Some(profile) => self.policy.profile_can_use(profile, feature, method),
            None => false,
        }
    }

    async fn save_cache(&self, profile: &Profile) -> Result<()> {
        if let Some(path) = &self.cache_file {
            let content = serde_json::to_string_pretty(profile)?;
            tokio::fs::write(path, content).await?;
        }
        Ok(())
    }

    async fn clear_local(&self) -> Result<()> {
        self.client.clear_tokens();
        *self.profile.write() = None;

        if let Some(path) = &self.cache_file {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
