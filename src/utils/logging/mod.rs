//! Logging utilities
//!
//! Subscriber initialisation for the binary and helpers that keep
//! credentials out of log lines.

mod sanitization;

pub use sanitization::mask_token;

use crate::config::LoggingConfig;
use crate::utils::error::{ClientError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ClientError::config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ClientError::config(format!("Failed to initialise logging: {}", e)))
}
