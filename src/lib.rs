//! citydata-collector: real-time population snapshots from Seoul open data
//!
//! This crate polls the city data API for a fixed list of areas every half
//! hour and saves each round as a timestamped CSV file.

pub mod areas;
pub mod collector;
pub mod config;
pub mod output;
pub mod record;
pub mod retry;
pub mod schedule;

use thiserror::Error;

/// Main error type for collector operations
///
/// Only startup and wiring failures surface here; failures during a
/// collection round are absorbed and logged.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use areas::{AreaEntry, AreaRegistry};
pub use config::Config;
pub use record::{CollectionBatch, PopulationRecord};
