//! Whole-registry collection
//!
//! Areas are fetched sequentially in registry order. A round that yields no
//! records at all is reported as absent so the scheduler can rerun it.

use crate::areas::AreaRegistry;
use crate::collector::{Collector, PopulationApi};
use crate::record::CollectionBatch;
use crate::retry::{retry, RetryPolicy};
use crate::schedule::Sleeper;
use thiserror::Error;

/// Failure of a whole collection round
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("No area returned data ({areas} attempted)")]
    Empty { areas: usize },
}

/// Drives a [`Collector`] across every area in a registry
pub struct BatchRunner<A> {
    collector: Collector<A>,
    registry: AreaRegistry,
}

impl<A: PopulationApi> BatchRunner<A> {
    pub fn new(collector: Collector<A>, registry: AreaRegistry) -> Self {
        Self {
            collector,
            registry,
        }
    }

    pub fn registry(&self) -> &AreaRegistry {
        &self.registry
    }

    pub fn collector(&self) -> &Collector<A> {
        &self.collector
    }

    /// Runs one collection round
    ///
    /// # Returns
    ///
    /// * `Some(batch)` - At least one area succeeded; records keep registry order
    /// * `None` - Every area exhausted its retries
    pub async fn run_batch<S: Sleeper>(&self, sleeper: &S) -> Option<CollectionBatch> {
        let mut records = Vec::with_capacity(self.registry.len());

        for area in &self.registry {
            if let Some(record) = self.collector.fetch_area(area, sleeper).await {
                records.push(record);
            }
        }

        tracing::info!(
            "Collected {} of {} areas",
            records.len(),
            self.registry.len()
        );

        CollectionBatch::from_records(records)
    }

    /// Runs rounds until one yields data or `policy` is exhausted
    pub async fn run_with_retry<S: Sleeper>(
        &self,
        policy: &RetryPolicy,
        sleeper: &S,
    ) -> Option<CollectionBatch> {
        retry("collection round", policy, sleeper, |attempt| async move {
            if attempt > 1 {
                tracing::info!(
                    "Rerunning collection ({}/{})",
                    attempt - 1,
                    policy.max_attempts.saturating_sub(1)
                );
            }
            self.run_batch(sleeper).await.ok_or(BatchError::Empty {
                areas: self.registry.len(),
            })
        })
        .await
    }
}
