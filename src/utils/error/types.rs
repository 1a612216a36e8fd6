//! Error types for the admin client

use thiserror::Error;

/// Result type alias for the admin client
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for the admin client
///
/// Access-policy evaluation never produces one of these: a denial is a plain
/// `false`. Errors come from loading configuration or tables, and from the
/// HTTP layer.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors (transport failures, request building)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL could not be turned into a request target
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Authentication errors (login rejected, malformed credentials)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The API still answered 401 after the refresh attempt
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success status for an operation that needs a success body
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}
