//! HTTP client for the city data API
//!
//! Builds request URLs from the [`ApiConfig`] and performs one GET per call.
//! Retrying is the collector's job, not the client's.

use crate::areas::AreaEntry;
use crate::collector::payload::decode_response;
use crate::collector::{CollectError, PopulationApi};
use crate::config::ApiConfig;
use crate::record::PopulationRecord;
use reqwest::Client;
use std::time::Duration;

/// User agent string identifying this collector
const USER_AGENT: &str = concat!("citydata-collector/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the configured timeout
///
/// # Example
///
/// ```no_run
/// use citydata_collector::config::ApiConfig;
/// use citydata_collector::collector::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`PopulationApi`]
#[derive(Debug, Clone)]
pub struct CitydataClient {
    client: Client,
    config: ApiConfig,
}

impl CitydataClient {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Request URL for one area
    ///
    /// `{base}/{key}/json/{service}/{start}/{end}/{area_code}`
    pub fn request_url(&self, area: &AreaEntry) -> String {
        format!(
            "{}/{}/json/{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key,
            self.config.service,
            self.config.start_index,
            self.config.end_index,
            area.code
        )
    }
}

impl PopulationApi for CitydataClient {
    async fn fetch(&self, area: &AreaEntry) -> Result<PopulationRecord, CollectError> {
        tracing::debug!(code = %area.code, "GET {}", area.name);

        // The access key is part of the path, so keep URLs out of errors
        let response = self
            .client
            .get(self.request_url(area))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(reqwest::Error::without_url)?;

        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        decode_response(&body)
    }
}
