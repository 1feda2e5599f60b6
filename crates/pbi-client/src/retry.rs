//! Status-driven retry layers.
//!
//! Two layers share the same mechanics and differ only in which status
//! codes they own: [`RateLimitRetryLayer`] handles 429,
//! [`TransientRetryLayer`] handles intermittent server errors. Neither
//! layer retries a transport error; those short-circuit immediately.

use std::time::Duration;

use http::Extensions;
use reqwest::header::HeaderMap;
use reqwest::{Request, Response};
use reqwest_middleware::Next;
use tracing::warn;

use crate::error::{Error, ErrorKind};
use crate::response::retry_after;

/// How long to wait before one retry attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDelay {
    /// Retry straight away.
    Immediate,
    /// Wait a fixed amount of time.
    Fixed(Duration),
    /// Wait for the server's `Retry-After` hint, or `fallback` without one.
    RetryAfter { fallback: Duration },
}

/// Ordered delays, one per retry. Its length is the retry budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    /// Delay before each retry attempt.
    pub delays: Vec<RetryDelay>,
    /// Added to every `Retry-After` hint.
    pub retry_after_padding: Duration,
    /// Upper bound for a `Retry-After` derived delay.
    pub max_retry_after: Duration,
}

impl RetrySchedule {
    /// Schedule with the given delays, 1s padding and a 60s cap.
    pub fn new(delays: Vec<RetryDelay>) -> Self {
        Self {
            delays,
            retry_after_padding: Duration::from_secs(1),
            max_retry_after: Duration::from_secs(60),
        }
    }

    /// Set the padding added to `Retry-After` hints.
    pub fn with_retry_after_padding(mut self, padding: Duration) -> Self {
        self.retry_after_padding = padding;
        self
    }

    /// Cap `Retry-After` derived delays.
    pub fn with_max_retry_after(mut self, max: Duration) -> Self {
        self.max_retry_after = max;
        self
    }

    /// Maximum number of retries.
    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }

    /// Delay before retry number `retry` (0-indexed), given the headers of
    /// the response that triggered it. `None` once the budget is spent.
    pub fn delay(&self, retry: usize, headers: &HeaderMap) -> Option<Duration> {
        let delay = match self.delays.get(retry)? {
            RetryDelay::Immediate => Duration::ZERO,
            RetryDelay::Fixed(delay) => *delay,
            RetryDelay::RetryAfter { fallback } => match retry_after(headers) {
                Some(hint) => hint
                    .saturating_add(self.retry_after_padding)
                    .min(self.max_retry_after),
                None => *fallback,
            },
        };
        Some(delay)
    }
}

/// Configuration for retrying HTTP 429.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRetryConfig {
    pub schedule: RetrySchedule,
}

impl Default for RateLimitRetryConfig {
    /// Immediate retry, then `Retry-After` + 1s (fallback 5s), then
    /// `Retry-After` + 1s (fallback 10s).
    fn default() -> Self {
        Self {
            schedule: RetrySchedule::new(vec![
                RetryDelay::Immediate,
                RetryDelay::RetryAfter {
                    fallback: Duration::from_secs(5),
                },
                RetryDelay::RetryAfter {
                    fallback: Duration::from_secs(10),
                },
            ]),
        }
    }
}

impl RateLimitRetryConfig {
    /// Use a custom schedule.
    pub fn with_schedule(schedule: RetrySchedule) -> Self {
        Self { schedule }
    }
}

/// Configuration for retrying intermittent server errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientRetryConfig {
    /// Status codes treated as transient.
    pub statuses: Vec<u16>,
    pub schedule: RetrySchedule,
}

impl Default for TransientRetryConfig {
    /// Retries 500 immediately, then once more after 1s.
    fn default() -> Self {
        Self {
            statuses: vec![500],
            schedule: RetrySchedule::new(vec![
                RetryDelay::Immediate,
                RetryDelay::Fixed(Duration::from_secs(1)),
            ]),
        }
    }
}

impl TransientRetryConfig {
    /// Also retries 400 and waits 5s before the second retry.
    pub fn hardened() -> Self {
        Self {
            statuses: vec![500, 400],
            schedule: RetrySchedule::new(vec![
                RetryDelay::Immediate,
                RetryDelay::Fixed(Duration::from_secs(5)),
            ]),
        }
    }

    /// Set the transient status codes.
    pub fn with_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Set the schedule.
    pub fn with_schedule(mut self, schedule: RetrySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    fn is_transient(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }
}

/// Re-dispatch `req` while `retryable` holds for the response status
/// and the schedule has budget left. Returns the last response.
async fn retry_on_status(
    req: Request,
    extensions: &mut Extensions,
    next: Next<'_>,
    schedule: &RetrySchedule,
    retryable: impl Fn(u16) -> bool,
    reason: &'static str,
) -> reqwest_middleware::Result<Response> {
    let mut retry = 0;
    loop {
        let attempt = req.try_clone().ok_or_else(|| {
            Error::new(ErrorKind::Other(
                "request body cannot be replayed for a retry".to_string(),
            ))
        })?;
        let response = next.clone().run(attempt, extensions).await?;

        let status = response.status().as_u16();
        if !retryable(status) {
            return Ok(response);
        }
        let Some(delay) = schedule.delay(retry, response.headers()) else {
            return Ok(response);
        };
        retry += 1;

        warn!(
            reason,
            attempt = retry,
            status,
            delay_ms = delay.as_millis() as u64,
            url = %req.url(),
            "Request failed, retrying"
        );

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Retries HTTP 429 responses.
#[derive(Debug, Clone, Default)]
pub struct RateLimitRetryLayer {
    config: RateLimitRetryConfig,
}

impl RateLimitRetryLayer {
    pub fn new(config: RateLimitRetryConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl reqwest_middleware::Middleware for RateLimitRetryLayer {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        retry_on_status(
            req,
            extensions,
            next,
            &self.config.schedule,
            |status| status == 429,
            "rate limited",
        )
        .await
    }
}

/// Retries the status codes configured as transient (500 by default).
#[derive(Debug, Clone, Default)]
pub struct TransientRetryLayer {
    config: TransientRetryConfig,
}

impl TransientRetryLayer {
    pub fn new(config: TransientRetryConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl reqwest_middleware::Middleware for TransientRetryLayer {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        retry_on_status(
            req,
            extensions,
            next,
            &self.config.schedule,
            |status| self.config.is_transient(status),
            "transient server error",
        )
        .await
    }
}
