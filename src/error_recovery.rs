// src/error_recovery.rs
//! Bounded retry for rate-limited API calls.

use crate::api::transport::HttpResponse;
use crate::constants::MAX_RETRY_AFTER;
use crate::error::{ApiErrorKind, AppError};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Waits between attempts. Injected so tests can observe delays without
/// spending wall-clock time.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How many times to retry a 429 and how long to wait when the server
/// does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_retries: u32,
    pub default_delay: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::constants::MAX_RATE_LIMIT_RETRIES,
            default_delay: crate::constants::DEFAULT_RETRY_AFTER,
        }
    }
}

/// Runs `operation` until it yields something other than a 429, or until
/// `policy.max_retries` additional attempts have been spent.
///
/// The final response is returned as-is, including a last 429, so the
/// caller normalizes it like any other rejection. Transport errors are
/// never retried.
pub async fn retry_rate_limited<F, Fut>(
    policy: RateLimitPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> Result<HttpResponse, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<HttpResponse, AppError>>,
{
    let mut retries = 0;

    loop {
        let response = operation().await?;
        if !ApiErrorKind::from_status(response.status).is_retryable() {
            return Ok(response);
        }

        if retries >= policy.max_retries {
            log::warn!(
                "Rate limited; giving up after {} retries",
                policy.max_retries
            );
            return Ok(response);
        }

        let delay = retry_after(&response, Utc::now()).unwrap_or(policy.default_delay);
        retries += 1;
        log::warn!(
            "Rate limited (attempt {}/{}), retrying after {:?}",
            retries,
            policy.max_retries,
            delay
        );
        sleeper.sleep(delay).await;
    }
}

/// Reads `Retry-After` as delta-seconds or as an HTTP date.
///
/// Values that do not fit a [`Duration`] read as absent. Waits are capped
/// at [`MAX_RETRY_AFTER`]; dates in the past mean no wait.
pub fn retry_after(response: &HttpResponse, now: DateTime<Utc>) -> Option<Duration> {
    let value = response.header("retry-after")?.trim();

    let wait = match value.parse::<f64>() {
        Ok(seconds) => Duration::try_from_secs_f64(seconds).ok()?,
        Err(_) => {
            let date = DateTime::parse_from_rfc2822(value).ok()?;
            (date.with_timezone(&Utc) - now)
                .to_std()
                .unwrap_or(Duration::ZERO)
        }
    };
    Some(wait.min(MAX_RETRY_AFTER))
}
