//! Bounded retry with a fixed delay
//!
//! Used for both levels of retry: single-area fetches and whole batches.
//! Attempts are separated by `delay`; there is no wait after the final
//! failed attempt, so a fully failing operation sleeps `max_attempts - 1`
//! times.

use crate::schedule::Sleeper;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How many times to try an operation and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Fixed wait between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// One initial attempt followed by up to `retries` reruns
    pub fn with_retries(retries: u32, delay: Duration) -> Self {
        Self::new(retries.saturating_add(1), delay)
    }
}

/// Runs `operation` until it succeeds or the policy is exhausted
///
/// The closure receives the 1-based attempt number. Failures are logged
/// under `label` and swallowed; exhaustion yields `None`.
///
/// # Example
///
/// ```no_run
/// # async fn demo() {
/// use citydata_collector::retry::{retry, RetryPolicy};
/// use citydata_collector::schedule::TokioSleeper;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(5));
/// let value = retry("demo", &policy, &TokioSleeper, |attempt| async move {
///     if attempt < 2 { Err("not yet") } else { Ok(attempt) }
/// })
/// .await;
/// assert_eq!(value, Some(2));
/// # }
/// ```
pub async fn retry<T, E, F, Fut, S>(
    label: &str,
    policy: &RetryPolicy,
    sleeper: &S,
    mut operation: F,
) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    S: Sleeper,
{
    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tracing::info!("{}: retrying in {}s", label, policy.delay.as_secs());
            sleeper.sleep(policy.delay).await;
        }

        match operation(attempt).await {
            Ok(value) => return Some(value),
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    "{}: {}",
                    label,
                    e
                );
            }
        }
    }

    tracing::debug!("{}: giving up after {} attempts", label, policy.max_attempts);
    None
}
