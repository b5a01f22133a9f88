use crate::areas::AreaEntry;
use crate::config::types::{ApiConfig, Config, OutputConfig, RetryConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_retry_config(&config.retry)?;
    validate_output_config(&config.output)?;
    validate_areas(&config.areas)?;
    Ok(())
}

/// Validates the provider endpoint settings
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation("api-key cannot be empty".to_string()));
    }

    // The key and service are path segments
    if config.api_key.contains('/') || config.service.contains('/') {
        return Err(ConfigError::Validation(
            "api-key and service must not contain '/'".to_string(),
        ));
    }

    if config.service.is_empty() {
        return Err(ConfigError::Validation("service cannot be empty".to_string()));
    }

    if config.start_index < 1 || config.start_index > config.end_index {
        return Err(ConfigError::Validation(format!(
            "start-index must be >= 1 and <= end-index, got {}..{}",
            config.start_index, config.end_index
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.area_max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "area-max-attempts must be >= 1, got {}",
            config.area_max_attempts
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates configured areas; an empty list selects the built-in registry
fn validate_areas(areas: &[AreaEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for area in areas {
        if area.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Area with code '{}' has an empty name",
                area.code
            )));
        }

        if area.code.trim().is_empty() || area.code.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Area '{}' has an invalid code '{}'",
                area.name, area.code
            )));
        }

        if !seen.insert(area.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate area code '{}'",
                area.code
            )));
        }
    }

    Ok(())
}
