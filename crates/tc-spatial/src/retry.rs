//! Bounded retry with exponential back-off for the primary routing request.

use std::future::Future;
use std::time::Duration;

use crate::SpatialResult;

/// Up to `max_attempts` tries; after failed attempt *n* the policy sleeps
/// `base_delay × 2^(n-1)` (1 s, 2 s, 4 s … with the defaults).  Errors for
/// which [`crate::SpatialError::is_retryable`] is `false` end the loop at
/// once.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay:   Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay: Duration::from_secs(1) }
    }
}

impl RetryPolicy {
    /// A policy that tries exactly once.
    pub fn none() -> Self {
        Self { max_attempts: 1, base_delay: Duration::ZERO }
    }

    /// Back-off to wait after failed attempt `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exp)
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    /// `what` names the operation in log output.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> SpatialResult<T>
    where
        F:   FnMut() -> Fut,
        Fut: Future<Output = SpatialResult<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    let delay = self.delay_after(attempt);
                    log::warn!("{what}: attempt {attempt}/{attempts} failed ({e}); retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
