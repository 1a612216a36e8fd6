//! Authentication and authorization
//!
//! Access decisions live in [`rbac`]; credentials in [`token_store`]; the
//! logged-in user in [`session`].

pub mod profile;
pub mod rbac;
pub mod session;
pub mod token_store;

// Re-export commonly used types
pub use profile::Profile;
pub use rbac::{AccessDecision, AccessPolicy, Department, HttpMethod, Role};
pub use session::Session;
pub use token_store::{CookieTokenStore, MemoryTokenStore, TokenKeys, TokenStore};
