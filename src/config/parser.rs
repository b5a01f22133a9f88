use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Environment variable overriding `api.api-key`
pub const API_KEY_ENV: &str = "CITYDATA_API_KEY";

/// Environment variable overriding `output.directory`
pub const OUTPUT_DIR_ENV: &str = "CITYDATA_OUTPUT_DIR";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use citydata_collector::config::load_config;
///
/// let config = load_config(Path::new("citydata.toml")).unwrap();
/// println!("Polling {} areas", config.registry().len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    let config = apply_overrides(config, |key| std::env::var(key).ok());

    validate(&config)?;

    Ok(config)
}

/// Builds the configuration without a file: built-in defaults plus
/// environment overrides
pub fn default_config() -> Result<Config, ConfigError> {
    let config = apply_overrides(Config::default(), |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Applies environment overrides using the given variable lookup
///
/// Empty values are treated as unset.
pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = lookup(API_KEY_ENV) {
        tracing::debug!("API key taken from {}", API_KEY_ENV);
        config.api.api_key = key;
    }

    if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
        tracing::debug!("Output directory taken from {}", OUTPUT_DIR_ENV);
        config.output.directory = PathBuf::from(dir);
    }

    config
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so exported files can be traced back to the settings
/// that produced them.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
