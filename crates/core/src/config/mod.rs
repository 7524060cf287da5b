//! Application configuration.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::Config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}
