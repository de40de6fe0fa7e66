//! Retry-with-backoff for unary upstream calls: one initial attempt plus up
//! to three retries, backing off `min(1s * 2^n, 30s)` between attempts.
//! Grounded on the `with_retry` wrapper in the ollama-lmstudio proxy example,
//! generalized from its "retry once after a side-effecting trigger" shape to
//! a plain exponential backoff loop since this gateway has no model-loading
//! step to trigger.

use std::time::Duration;

use gateway_core::error::GatewayError;

const MAX_RETRIES: u8 = 3;

fn backoff_delay(attempt: u8) -> Duration {
    let secs = 1u64.checked_shl(attempt as u32).unwrap_or(30).min(30);
    Duration::from_secs(secs)
}

/// Runs `attempt_fn` until it succeeds, returns a non-retryable error, or
/// exhausts its retry budget. `attempt_fn` receives the zero-based attempt
/// number, purely for logging.
pub async fn with_retry<T, F, Fut>(mut attempt_fn: F) -> Result<T, GatewayError>
where
    F: FnMut(u8) -> Fut,
    Fut: std::future::Future<Output = Result<T, GatewayError>>,
{
    let mut attempt: u8 = 0;
    loop {
        match attempt_fn(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_RETRIES && err.is_retryable() => {
                tracing::warn!(attempt, error = %err, "retrying upstream call");
                tokio::time::sleep(backoff_delay(attempt)).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU8, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry_when_first_attempt_succeeds() {
        let calls = AtomicU8::new(0);
        let result = with_retry(|_attempt| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok::<_, GatewayError>(42) }
        })
        .await
        .unwrap();
        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn retries_retryable_errors_up_to_the_budget() {
        let calls = AtomicU8::new(0);
        let result = with_retry(|_attempt| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err::<i32, _>(GatewayError::UpstreamTransient) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), MAX_RETRIES + 1);
    }

    #[tokio::test]
    async fn does_not_retry_non_retryable_errors() {
        let calls = AtomicU8::new(0);
        let result = with_retry(|_attempt| {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Err::<i32, _>(GatewayError::Authentication) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn recovers_after_a_transient_failure() {
        let calls = AtomicU8::new(0);
        let result = with_retry(|_attempt| {
            let n = calls.fetch_add(1, Ordering::Relaxed);
            async move {
                if n == 0 {
                    Err(GatewayError::RateLimit)
                } else {
                    Ok(7)
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(result, 7);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
