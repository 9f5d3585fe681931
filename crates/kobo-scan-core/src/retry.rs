//! Fixed-delay retry for the two suspending stages (capture, delivery).
//!
//! Every failure is retried until the attempt budget runs out. The delay
//! between attempts is constant; there is no backoff growth.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::config::{CaptureConfig, DeliveryConfig};

/// Retry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Delay between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Policy for companion delivery.
    pub fn for_delivery(config: &DeliveryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.retry_delay_ms))
    }

    /// Policy for the SDK capture call.
    pub fn for_capture(config: &CaptureConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.retry_delay_ms))
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted<E> {
    /// Attempts made.
    pub attempts: u32,
    /// Error of the last attempt.
    pub last: E,
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// `operation` receives the 1-based attempt number.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    info!(label, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if attempt < max_attempts => {
                warn!(label, attempt, max_attempts, error = %err, "attempt failed, retrying");
                if !policy.delay.is_zero() {
                    debug!(label, delay_ms = policy.delay.as_millis() as u64, "waiting before retry");
                    tokio::time::sleep(policy.delay).await;
                }
                attempt += 1;
            }
            Err(err) => {
                warn!(label, attempt, error = %err, "retry limit exhausted");
                return Err(Exhausted { attempts: attempt, last: err });
            }
        }
    }
}
