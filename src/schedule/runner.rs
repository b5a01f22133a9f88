//! Collection loop
//!
//! Alternates between two states forever:
//!
//! | State | Action |
//! |-------|--------|
//! | Collecting | Run the batch (with reruns), export, print the summary |
//! | Waiting | Sleep until the next :00 or :30 after the tick started |
//!
//! Failures inside a tick never end the loop.

use crate::collector::{BatchRunner, PopulationApi};
use crate::output::{print_summary, CsvExporter};
use crate::retry::RetryPolicy;
use crate::schedule::boundary::next_half_hour;
use crate::schedule::clock::{Clock, Sleeper};
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Waiting { started_at: DateTime<Local> },
}

/// What a collecting tick produced
#[derive(Debug)]
pub enum TickOutcome {
    /// A file was written
    Exported { path: PathBuf, records: usize },

    /// Every round came back empty; nothing written
    NoData,

    /// Data was collected but the file could not be written
    ExportFailed { records: usize },
}

/// Runs collection ticks on half-hour slots
pub struct Scheduler<A, C, S> {
    runner: BatchRunner<A>,
    exporter: CsvExporter,
    batch_policy: RetryPolicy,
    clock: C,
    sleeper: S,
}

impl<A, C, S> Scheduler<A, C, S>
where
    A: PopulationApi,
    C: Clock,
    S: Sleeper,
{
    pub fn new(
        runner: BatchRunner<A>,
        exporter: CsvExporter,
        batch_policy: RetryPolicy,
        clock: C,
        sleeper: S,
    ) -> Self {
        Self {
            runner,
            exporter,
            batch_policy,
            clock,
            sleeper,
        }
    }

    pub fn runner(&self) -> &BatchRunner<A> {
        &self.runner
    }

    /// Collecting state: one collection tick
    ///
    /// Returns the outcome and the time the tick started, which anchors the
    /// following wait.
    pub async fn run_tick(&self) -> (TickOutcome, DateTime<Local>) {
        let started_at = self.clock.now();
        tracing::info!(
            "Starting collection at {}",
            started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let batch = self
            .runner
            .run_with_retry(&self.batch_policy, &self.sleeper)
            .await;

        let Some(batch) = batch else {
            tracing::error!(
                "All {} collection attempts failed; nothing saved this round",
                self.batch_policy.max_attempts
            );
            return (TickOutcome::NoData, started_at);
        };

        let outcome = match self.exporter.export(&batch, &self.clock.now()) {
            Ok(path) => {
                print_summary(&batch);
                TickOutcome::Exported {
                    path,
                    records: batch.len(),
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to save {} records to {}: {}",
                    batch.len(),
                    self.exporter.directory().display(),
                    e
                );
                TickOutcome::ExportFailed {
                    records: batch.len(),
                }
            }
        };

        (outcome, started_at)
    }

    /// Waiting state: sleeps until the slot after `started_at`
    ///
    /// Returns the slot waited for. No sleep happens when the slot has
    /// already passed.
    pub async fn wait_until_next_slot(&self, started_at: &DateTime<Local>) -> DateTime<Local> {
        let next_run = next_half_hour(started_at);
        let remaining = next_run.clone() - self.clock.now();

        match remaining.to_std() {
            Ok(duration) if !duration.is_zero() => {
                tracing::info!(
                    "Next collection at {} (waiting {}s)",
                    next_run.format("%Y-%m-%d %H:%M:%S"),
                    duration.as_secs()
                );
                self.sleeper.sleep(duration).await;
            }
            _ => {
                tracing::warn!(
                    "Slot {} already passed; collecting now",
                    next_run.format("%H:%M:%S")
                );
            }
        }

        next_run
    }

    /// Runs the loop for `max_ticks` ticks, or forever when `None`
    ///
    /// No wait follows the final tick of a bounded run.
    pub async fn run(&self, max_ticks: Option<u64>) {
        let mut phase = Phase::Collecting;
        let mut ticks = 0u64;

        loop {
            phase = match phase {
                Phase::Collecting => {
                    let (_, started_at) = self.run_tick().await;
                    ticks += 1;
                    if max_ticks.is_some_and(|max| ticks >= max) {
                        return;
                    }
                    Phase::Waiting { started_at }
                }
                Phase::Waiting { started_at } => {
                    self.wait_until_next_slot(&started_at).await;
                    Phase::Collecting
                }
            };
        }
    }
}
