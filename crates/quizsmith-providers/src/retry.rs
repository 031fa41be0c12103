//! Bounded retry with exponential backoff for transient service errors.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::ProviderError;

const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Run `operation` up to `max_retries + 1` times, backing off between
/// attempts.
///
/// Permanent failures (bad credentials, unknown model, invalid payload) are
/// returned immediately. A rate-limit response that names a retry-after
/// window is honored instead of the computed backoff.
pub async fn with_retries<T, F, Fut>(
    max_retries: u32,
    initial_delay: Duration,
    mut operation: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut delay = initial_delay;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(MAX_BACKOFF);
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let provider_err = err.downcast_ref::<ProviderError>();
                if provider_err.is_some_and(ProviderError::is_permanent) {
                    return Err(err);
                }
                if attempt == max_retries {
                    return Err(err);
                }
                if let Some(ms) = provider_err.and_then(ProviderError::retry_after_ms) {
                    delay = Duration::from_millis(ms).min(MAX_BACKOFF);
                }
                warn!(attempt = attempt + 1, error = %err, "retrying after transient error");
            }
        }
    }

    unreachable!("retry loop returns on final attempt")
}
