/*!
 * Concurrency and rate bounding for remote calls.
 *
 * Two concerns, composed rather than conflated: a counting semaphore caps
 * how many calls are in flight, and a per-permit cooldown keeps a released
 * permit out of circulation long enough that aggregate throughput stays at
 * roughly `permits / cooldown` calls per second.
 */

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Shared limiter for all pool workers.
///
/// `acquire` never fails, it only waits. The limiter is the single point of
/// contention between workers and is safe for concurrent use.
#[derive(Debug)]
pub struct RateLimiter {
    permits: Arc<Semaphore>,
    cooldown: Duration,
}

impl RateLimiter {
    /// Create a limiter with the given permit count and per-permit cooldown
    pub fn new(max_concurrency: usize, cooldown: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency)),
            cooldown,
        }
    }

    /// Wait for a permit. Returns a guard that restores the permit after
    /// the cooldown once dropped.
    pub async fn acquire(&self) -> RatePermit {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("rate limiter semaphore is never closed");

        RatePermit {
            inner: Some(permit),
            permits: Arc::clone(&self.permits),
            cooldown: self.cooldown,
        }
    }

    /// Wait for a permit, giving up after `timeout`.
    ///
    /// Cancellation hook for callers that cannot block indefinitely; the
    /// pipeline itself uses the blocking [`acquire`](Self::acquire).
    pub async fn acquire_timeout(&self, timeout: Duration) -> Option<RatePermit> {
        tokio::time::timeout(timeout, self.acquire()).await.ok()
    }

    /// Number of permits currently available
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

/// RAII guard for one unit of call capacity.
///
/// Dropping the guard does not hand the permit straight back: the permit
/// slot re-opens only after the cooldown has elapsed, which is what bounds
/// burst rate independently of pool size.
#[derive(Debug)]
pub struct RatePermit {
    inner: Option<OwnedSemaphorePermit>,
    permits: Arc<Semaphore>,
    cooldown: Duration,
}

impl Drop for RatePermit {
    fn drop(&mut self) {
        if let Some(permit) = self.inner.take() {
            permit.forget();
            if self.cooldown.is_zero() {
                self.permits.add_permits(1);
            } else {
                let permits = Arc::clone(&self.permits);
                let cooldown = self.cooldown;
                tokio::spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    permits.add_permits(1);
                });
            }
        }
    }
}
