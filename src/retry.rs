use std::future::Future;
use std::time::Duration;

/// Retry decision returned by the error classifier callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    Retry,
    Abort,
}

/// Exponential backoff configuration.
///
/// The schedule is deterministic (`base_delay * 2^attempt`, no jitter):
/// the mirror runs sequentially against a single origin, so there is no
/// herd to spread out.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts per item, the first one included.
    pub max_attempts: u32,
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    /// Delay slept after the failure of attempt `attempt` (0-indexed):
    /// 30, 60, 120, 240, ... seconds for the default base.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_secs(self.base_delay_secs.saturating_mul(factor))
    }
}

/// Retry an async operation with exponential backoff.
///
/// - `config`: retry configuration
/// - `classifier`: inspects an error and returns `Retry` or `Abort`
/// - `operation`: the async closure to retry
///
/// Returns the first `Ok` result, or the last error once the classifier
/// aborts or the attempt budget is exhausted.
pub async fn retry_with_backoff<F, Fut, T, E, C>(
    config: &RetryConfig,
    classifier: C,
    operation: F,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> RetryAction,
    E: std::fmt::Display,
{
    let mut last_err: Option<E> = None;

    for attempt in 0..config.max_attempts {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if classifier(&e) == RetryAction::Abort {
                    return Err(e);
                }
                if attempt + 1 >= config.max_attempts {
                    last_err = Some(e);
                    break;
                }
                let delay = config.delay_for_attempt(attempt);
                tracing::warn!(
                    "Attempt {}/{} failed: {}. Retrying in {} seconds...",
                    attempt + 1,
                    config.max_attempts,
                    e,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(last_err.expect("loop must have run at least once"))
}
