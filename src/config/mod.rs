//! Configuration module for the collector
//!
//! Handles loading, parsing, and validating the optional TOML configuration
//! file. Without a file, the built-in defaults apply; `CITYDATA_API_KEY` and
//! `CITYDATA_OUTPUT_DIR` override the corresponding settings either way.
//!
//! # Example
//!
//! ```no_run
//! use citydata_collector::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("citydata.toml")).unwrap();
//! println!("Output directory: {}", config.output.directory.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, OutputConfig, RetryConfig};

// Re-export parser functions
pub use parser::{
    apply_overrides, compute_config_hash, default_config, load_config, load_config_with_hash,
    API_KEY_ENV, OUTPUT_DIR_ENV,
};
pub use validation::validate;
