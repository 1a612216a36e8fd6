//! Utility modules for the admin client
//!
//! - **error**: Error types shared by every module
//! - **logging**: Subscriber setup and log sanitization

pub mod error;
pub mod logging;

pub use error::{ClientError, Result};
pub use logging::{init_logging, mask_token};
