//! Time sources and timed waits
//!
//! The scheduler and the retry loops never call the system clock or
//! `tokio::time::sleep` directly. They go through [`Clock`] and [`Sleeper`]
//! so tests can pin the current time and record waits instead of performing
//! them.

use chrono::{DateTime, Local};
use std::future::Future;
use std::time::Duration;

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Performs a timed, uninterruptible wait
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}
