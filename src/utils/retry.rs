//! Bounded retry for transient store failures.
//!
//! The policy lives outside the pagination logic so it can be tuned per
//! run and unit-tested against injected failing operations.

use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::domain::store::StoreError;

/// Retries an operation a bounded number of times with a fixed pause
/// between attempts.
///
/// Only deadline-exceeded failures are retried; any other store error is
/// returned immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    /// Pause between consecutive attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Runs `op`, retrying deadline-exceeded failures until the attempt
    /// budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the last error once the budget is exhausted, or the first
    /// non-retryable error immediately.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let strategy = FixedInterval::new(self.backoff).take(self.max_attempts.saturating_sub(1));
        RetryIf::spawn(strategy, op, StoreError::is_deadline_exceeded).await
    }
}
