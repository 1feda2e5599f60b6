//! Polling long-running operations with a deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Outcome of a single status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus<T> {
    /// The operation finished.
    Done(T),
    /// Still running, check again after the interval.
    Pending,
}

/// Call `check` every `interval` until it reports [`PollStatus::Done`],
/// returns an error, or `timeout` elapses.
///
/// The deadline interrupts the wait between checks, but a check already
/// in flight is allowed to complete first. Dropping the returned future
/// stops polling.
pub async fn poll_until<T, F, Fut>(
    operation: &str,
    interval: Duration,
    timeout: Duration,
    mut check: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus<T>>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        if let PollStatus::Done(value) = check().await? {
            return Ok(value);
        }

        let timed_out = || {
            Error::new(ErrorKind::OperationTimeout {
                operation: operation.to_string(),
                timeout,
            })
        };

        if Instant::now() >= deadline {
            return Err(timed_out());
        }

        debug!(operation, attempt, "Operation pending");

        tokio::select! {
            biased;
            _ = sleep_until(deadline) => return Err(timed_out()),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
