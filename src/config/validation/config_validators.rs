//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

/// Upper bound on the post-refresh grace delay
const MAX_REFRESH_GRACE_MS: u64 = 10_000;

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating api configuration");

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base_url '{}': {}", self.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        for (name, path) in [
            ("refresh_path", &self.refresh_path),
            ("profile_path", &self.profile_path),
            ("login_path", &self.login_path),
        ] {
            if !path.starts_with("/api") {
                return Err(format!("{} must start with /api, got '{}'", name, path));
            }
        }

        if self.refresh_grace_ms > MAX_REFRESH_GRACE_MS {
            return Err(format!(
                "refresh_grace_ms should not exceed {} ms",
                MAX_REFRESH_GRACE_MS
            ));
        }

        if self.token_ttl_days == 0 {
            return Err("token_ttl_days must be greater than 0".to_string());
        }

        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("access_cookie", &self.access_cookie),
            ("refresh_cookie", &self.refresh_cookie),
        ] {
            if value.is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
            if value
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '=' | ';' | ','))
            {
                return Err(format!("{} is not a valid cookie name: '{}'", name, value));
            }
        }

        if self.access_cookie == self.refresh_cookie {
            return Err("access_cookie and refresh_cookie must differ".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("log level cannot be empty".to_string());
        }
        Ok(())
    }
}
