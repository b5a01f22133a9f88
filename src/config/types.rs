use crate::areas::{AreaEntry, AreaRegistry};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the collector
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Replaces the built-in area list when non-empty
    #[serde(default, rename = "area")]
    pub areas: Vec<AreaEntry>,
}

impl Config {
    /// The registry to poll: configured areas, or the built-in list
    pub fn registry(&self) -> AreaRegistry {
        if self.areas.is_empty() {
            AreaRegistry::default_areas()
        } else {
            AreaRegistry::new(self.areas.clone())
        }
    }
}

/// Provider endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ApiConfig {
    /// Scheme, host and port of the open-data gateway
    pub base_url: String,

    /// Access token embedded in the request path
    pub api_key: String,

    /// Dataset name
    pub service: String,

    /// First result index requested
    pub start_index: u32,

    /// Last result index requested; only the first row is used
    pub end_index: u32,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://openapi.seoul.go.kr:8088".to_string(),
            api_key: "sample".to_string(),
            service: "citydata_ppltn".to_string(),
            start_index: 1,
            end_index: 5,
            timeout_secs: 30,
        }
    }
}

/// Retry policies for single areas and whole batches
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RetryConfig {
    /// Attempts per area, including the first
    pub area_max_attempts: u32,

    /// Delay between attempts for one area (seconds)
    pub area_delay_secs: u64,

    /// Reruns of a batch that came back empty
    pub batch_max_retries: u32,

    /// Delay before each batch rerun (seconds)
    pub batch_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            area_max_attempts: 3,
            area_delay_secs: 5,
            batch_max_retries: 3,
            batch_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn area_delay(&self) -> Duration {
        Duration::from_secs(self.area_delay_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.batch_delay_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory receiving the CSV files, created on first export
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("유동인구데이터"),
        }
    }
}
