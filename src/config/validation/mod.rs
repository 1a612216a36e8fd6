//! Configuration validation
//!
//! Each configuration section implements [`Validate`]; errors are plain
//! messages that [`crate::config::Config::validate`] wraps with the section name.

mod config_validators;
mod trait_def;

pub use trait_def::Validate;
