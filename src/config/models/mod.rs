//! Configuration data models
//!
//! This module defines all configuration structures used by the client.

#![allow(missing_docs)]

pub mod api;
pub mod logging;
pub mod session;

pub use api::*;
pub use logging::*;
pub use session::*;

/// Base origin compiled into the client
pub const DEFAULT_BASE_URL: &str = "https://api.qa-review.example.com";

/// Default base origin for API paths
pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default token refresh endpoint
pub fn default_refresh_path() -> String {
    "/api/v1/authorization/token/refresh".to_string()
}

/// Default "who am I" endpoint
pub fn default_profile_path() -> String {
    "/api/v1/profile/user/me".to_string()
}

/// Default login endpoint
pub fn default_login_path() -> String {
    "/api/v1/authorization/token".to_string()
}

/// Default wait after a refresh response before re-reading the token store
pub fn default_refresh_grace_ms() -> u64 {
    100
}

/// Default lifetime of persisted tokens
pub fn default_token_ttl_days() -> u32 {
    7
}

/// Default access token cookie name
pub fn default_access_cookie() -> String {
    "rb_admin_token".to_string()
}

/// Default refresh token cookie name
pub fn default_refresh_cookie() -> String {
    "refresh_token".to_string()
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
