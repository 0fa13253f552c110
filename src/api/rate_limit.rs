//! Rate limiting between API calls and bounded retry on transient failures.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, Instant};

use crate::error::{Error, Result};

/// Upper bound on a single backoff sleep, whatever the API reports.
const MAX_BACKOFF: Duration = Duration::from_secs(900);

/// Enforces a minimum spacing between consecutive calls and retries
/// rate-limited or transient network failures a bounded number of times.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    max_retries: u32,
    default_backoff: Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_secs: f64, max_retries: u32, default_backoff_secs: u64) -> Self {
        Self {
            delay: Duration::from_secs_f64(delay_secs.max(0.0)),
            max_retries,
            default_backoff: Duration::from_secs(default_backoff_secs),
            last_call: None,
        }
    }

    /// Sleep until the configured delay since the previous call has passed.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                sleep(self.delay - elapsed).await;
            }
        }
        self.last_call = Some(Instant::now());
    }

    /// Run `op`, retrying up to the configured attempt count on retryable
    /// errors. Non-retryable errors (authentication, not-found) are
    /// returned immediately; the caller decides whether to skip or abort.
    pub async fn call_with_retry<T, F, Fut>(&mut self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;

        loop {
            self.wait().await;

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = self.backoff_for(&e, attempt);
                    tracing::warn!(
                        "Retryable API failure (attempt {}/{}), backing off {:?}: {}",
                        attempt,
                        self.max_retries,
                        backoff,
                        e
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Backoff duration for a failed attempt. Rate limits honor the
    /// API-reported duration; network errors use a short exponential
    /// backoff. Jitter avoids hammering on exact boundaries.
    fn backoff_for(&self, error: &Error, attempt: u32) -> Duration {
        let base = match error {
            Error::RateLimited(secs) => {
                if *secs > 0 {
                    Duration::from_secs(*secs)
                } else {
                    self.default_backoff
                }
            }
            _ => Duration::from_millis(500 * 2u64.pow(attempt.min(6))),
        };

        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
        (base + jitter).min(MAX_BACKOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_rate_limited_retry() {
        let mut limiter = RateLimiter::new(0.0, 2, 1);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in_op = calls.clone();
        let result = limiter
            .call_with_retry(|| {
                let calls = calls_in_op.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::RateLimited(1))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let mut limiter = RateLimiter::new(0.0, 2, 1);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in_op = calls.clone();
        let result: Result<()> = limiter
            .call_with_retry(|| {
                let calls = calls_in_op.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(Error::Network("unreachable".into()))
                }
            })
            .await;

        assert!(matches!(result, Err(Error::Network(_))));
        // Initial attempt plus two retries.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_retry_authentication_errors() {
        let mut limiter = RateLimiter::new(0.0, 5, 1);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in_op = calls.clone();
        let result: Result<()> = limiter
            .call_with_retry(|| {
                let calls = calls_in_op.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(Error::Authentication("bad token".into()))
                }
            })
            .await;

        assert!(matches!(result, Err(Error::Authentication(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn enforces_delay_between_calls() {
        let mut limiter = RateLimiter::new(2.0, 0, 1);

        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;

        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
