//! Collector module: per-area fetching and whole-batch collection
//!
//! This module contains:
//! - The [`PopulationApi`] seam and its reqwest implementation
//! - Typed decoding of the provider envelope
//! - Per-area bounded retry ([`Collector::fetch_area`])
//! - Sequential collection across the registry ([`BatchRunner`])

mod batch;
mod client;
mod payload;

pub use batch::{BatchError, BatchRunner};
pub use client::{build_http_client, CitydataClient};
pub use payload::{decode_response, ROWS_KEY};

use crate::areas::AreaEntry;
use crate::record::PopulationRecord;
use crate::retry::{retry, RetryPolicy};
use crate::schedule::Sleeper;
use std::future::Future;
use thiserror::Error;

/// A response that could not be decoded into a population row
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct DecodeError {
    /// Which part of the response failed
    pub context: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub fn new(context: &'static str, source: serde_json::Error) -> Self {
        Self { context, source }
    }
}

/// Transient failure of a single fetch attempt
///
/// Every variant is retried the same way; none escapes the collector.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("No data returned ({detail})")]
    Empty { detail: String },

    #[error("Response is for {got}, expected {expected}")]
    AreaMismatch { expected: String, got: String },
}

/// Source of population rows for a single area
///
/// Each call is exactly one request; no retrying.
pub trait PopulationApi {
    fn fetch(
        &self,
        area: &AreaEntry,
    ) -> impl Future<Output = Result<PopulationRecord, CollectError>>;
}

/// Rejects records that do not belong to the requested area
fn ensure_requested_area(
    area: &AreaEntry,
    record: PopulationRecord,
) -> Result<PopulationRecord, CollectError> {
    if record.area_code != area.code || record.area_name != area.name {
        return Err(CollectError::AreaMismatch {
            expected: area.to_string(),
            got: format!("{} ({})", record.area_name, record.area_code),
        });
    }
    Ok(record)
}

/// Fetches areas one at a time with bounded retry
pub struct Collector<A> {
    api: A,
    policy: RetryPolicy,
}

impl<A: PopulationApi> Collector<A> {
    pub fn new(api: A, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Collects one area
    ///
    /// Tries up to `policy.max_attempts` times, waiting `policy.delay`
    /// between attempts. HTTP errors, undecodable or empty responses, and
    /// rows for a different area all count as failed attempts.
    ///
    /// # Returns
    ///
    /// * `Some(record)` - The area's row; its code and name match `area`
    /// * `None` - Every attempt failed
    pub async fn fetch_area<S: Sleeper>(
        &self,
        area: &AreaEntry,
        sleeper: &S,
    ) -> Option<PopulationRecord> {
        let record = retry(&area.name, &self.policy, sleeper, |attempt| async move {
            let record = ensure_requested_area(area, self.api.fetch(area).await?)?;
            tracing::info!(
                code = %area.code,
                attempt,
                "Collected {} ({})",
                area.name,
                record.congestion_level
            );
            Ok::<_, CollectError>(record)
        })
        .await;

        if record.is_none() {
            tracing::warn!(
                code = %area.code,
                "Skipping {} after {} failed attempts",
                area.name,
                self.policy.max_attempts
            );
        }

        record
    }
}
