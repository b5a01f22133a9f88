//! Scheduling: half-hour slots, injectable time, and the collection loop

mod boundary;
pub(crate) mod clock;
mod runner;

pub use boundary::{next_half_hour, next_half_hour_naive};
pub use clock::{Clock, Sleeper, SystemClock, TokioSleeper};
pub use runner::{Phase, Scheduler, TickOutcome};

use crate::collector::{BatchRunner, CitydataClient, Collector};
use crate::config::Config;
use crate::output::CsvExporter;
use crate::retry::RetryPolicy;
use crate::CollectorError;

/// Scheduler wired to the real HTTP client, wall clock and tokio timer
pub type LiveScheduler = Scheduler<CitydataClient, SystemClock, TokioSleeper>;

/// Builds the production scheduler from a validated configuration
///
/// # Returns
///
/// * `Ok(LiveScheduler)` - Ready to run
/// * `Err(CollectorError)` - The HTTP client could not be built
pub fn build_scheduler(config: &Config) -> Result<LiveScheduler, CollectorError> {
    let client = CitydataClient::new(config.api.clone())?;
    let area_policy = RetryPolicy::new(config.retry.area_max_attempts, config.retry.area_delay());
    let batch_policy =
        RetryPolicy::with_retries(config.retry.batch_max_retries, config.retry.batch_delay());

    Ok(Scheduler::new(
        BatchRunner::new(Collector::new(client, area_policy), config.registry()),
        CsvExporter::new(&config.output.directory),
        batch_policy,
        SystemClock,
        TokioSleeper,
    ))
}

/// Runs the collection loop
///
/// This is the main entry point. It collects every area, exports the
/// round, waits for the next half-hour slot and repeats, either forever or
/// for `max_ticks` rounds.
pub async fn run_collection(config: &Config, max_ticks: Option<u64>) -> Result<(), CollectorError> {
    let scheduler = build_scheduler(config)?;
    scheduler.run(max_ticks).await;
    Ok(())
}
