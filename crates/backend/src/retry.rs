//! Bounded exponential backoff for backend calls.
//!
//! Only transient transport failures are retried; API rejections return
//! immediately. `max_attempts = 1` disables retry entirely.

use std::time::Duration;

use iterthought_core::BackendError;
use tracing::warn;

/// How many times to attempt a generation call and how long to wait
/// between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts (first try included); must be at least 1
    pub max_attempts: u32,

    /// Delay before the first retry; doubles per subsequent attempt
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        }
    }

    /// Backoff before the retry following `attempt` (1-based).
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Run `op` under the policy, retrying transient failures.
///
/// A transient failure on the final attempt surfaces as
/// [`BackendError::ExhaustedRetries`] when more than one attempt was
/// allowed, otherwise as the raw transport error.
pub(crate) async fn retry_transient<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < attempts => {
                let delay = policy.backoff_for(attempt);
                warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient backend failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) if e.is_transient() => {
                if attempts > 1 {
                    return Err(BackendError::ExhaustedRetries {
                        attempts,
                        last: e.to_string(),
                    });
                }
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("loop returns on every attempt")
}
