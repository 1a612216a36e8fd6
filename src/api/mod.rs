//! Authenticated access to the remote REST API
//!
//! [`ApiClient::request`] attaches the stored bearer token, and on a 401
//! refreshes it through a single shared round-trip before retrying once.

mod client;
mod refresh;
mod request;

pub use client::ApiClient;
pub(crate) use client::TokenResponse;
pub use refresh::RefreshCoordinator;
pub use request::{RequestBody, RequestOptions, resolve_url};
