//! # rb-admin-core
//!
//! Client-side access control and authenticated API access for the QA
//! chat-review admin dashboard.
//!
//! ## Features
//!
//! - **Access policy**: department and role gates for navigation paths, and
//!   per-feature HTTP method grants, from built-in tables or a YAML file
//! - **Authenticated requests**: bearer token attached to every call, with a
//!   single shared refresh when concurrent requests hit a 401
//! - **Session**: login, profile loading and an on-disk profile cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rb_admin_core::{AccessPolicy, ApiClient, Config, Department, HttpMethod, Role};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let policy = AccessPolicy::new();
//!     assert!(policy.can_access_feature(
//!         "/projects",
//!         Some(Department::QualityAssurance),
//!         Some(Role::Head),
//!     ));
//!     assert!(!policy.can_use_method(
//!         "chats",
//!         HttpMethod::Patch,
//!         Some(Department::Support),
//!         Some(Role::Agent),
//!     ));
//!
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(config.api, &config.session)?;
//!     let response = client.get("/api/v1/chats").await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod auth;
pub mod config;
pub mod utils;

// Re-export main types
pub use api::{ApiClient, RequestBody, RequestOptions, resolve_url};
pub use auth::{
    AccessDecision, AccessPolicy, Department, HttpMethod, MemoryTokenStore, Profile, Role,
    Session, TokenStore,
};
pub use config::Config;
pub use utils::error::{ClientError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load the access policy a configuration points at
///
/// Falls back to the built-in tables when no policy file is configured.
pub async fn load_policy(config: &Config) -> Result<AccessPolicy> {
    match &config.policy_file {
        Some(path) => AccessPolicy::from_file(path).await,
        None => Ok(AccessPolicy::new()),
    }
}
