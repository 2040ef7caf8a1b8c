//! Process-wide token bucket.

use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota};
use tracing::trace;

use crate::context::Context;
use crate::error::TetrioError;
use crate::rate_limit::RateLimitConfig;

/// Token bucket shared by every request of a process.
///
/// Built on governor's GCRA limiter, so the bucket state is a single atomic
/// cell and concurrent [`acquire`](RateLimiter::acquire) calls never
/// over-admit.
pub struct RateLimiter {
    inner: Option<DefaultDirectRateLimiter>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter from `config`.
    ///
    /// A zero period or a disabled config yields a limiter that never waits.
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
        let inner = if config.enabled {
            Quota::with_period(config.period)
                .map(|quota| DefaultDirectRateLimiter::direct(quota.allow_burst(burst)))
        } else {
            None
        };

        Self { inner, config }
    }

    /// A limiter that admits everything.
    pub fn unlimited() -> Self {
        Self::new(RateLimitConfig::disabled())
    }

    /// Get the configuration this limiter was built with.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Wait for a token.
    ///
    /// Fails with [`TetrioError::Cancelled`] if `ctx` fires first. A caller
    /// that is already cancelled, or that gives up while waiting, does not
    /// consume a token.
    pub async fn acquire(&self, ctx: &Context) -> Result<(), TetrioError> {
        let Some(limiter) = &self.inner else {
            return Ok(());
        };

        if ctx.is_cancelled() {
            return Err(TetrioError::Cancelled);
        }

        if limiter.check().is_ok() {
            return Ok(());
        }

        trace!("rate limiter empty, waiting for a token");
        ctx.run(limiter.until_ready()).await
    }

    /// Take a token if one is available right now.
    pub fn try_acquire(&self) -> bool {
        self.inner
            .as_ref()
            .is_none_or(|limiter| limiter.check().is_ok())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn slow_limiter(burst: u32) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            period: Duration::from_secs(30),
            burst,
            enabled: true,
        })
    }

    #[tokio::test]
    async fn test_burst_is_admitted_immediately() {
        let limiter = slow_limiter(2);
        let ctx = Context::with_timeout(Duration::from_millis(200));

        assert!(limiter.acquire(&ctx).await.is_ok());
        assert!(limiter.acquire(&ctx).await.is_ok());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_cancellation_before_token_returns_promptly() {
        let limiter = slow_limiter(1);
        assert!(limiter.try_acquire());

        let started = Instant::now();
        let ctx = Context::with_timeout(Duration::from_millis(50));
        let result = limiter.acquire(&ctx).await;

        assert!(matches!(result, Err(TetrioError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_cancelled_caller_keeps_token() {
        let limiter = slow_limiter(1);
        let ctx = Context::background();
        ctx.cancel();

        let result = limiter.acquire(&ctx).await;
        assert!(matches!(result, Err(TetrioError::Cancelled)));
        assert!(limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_explicit_cancel_unblocks_waiter() {
        let limiter = Arc::new(slow_limiter(1));
        assert!(limiter.try_acquire());

        let ctx = Context::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = limiter.acquire(&ctx).await;
        assert!(matches!(result, Err(TetrioError::Cancelled)));
    }

    #[tokio::test]
    async fn test_tokens_refill() {
        let limiter = RateLimiter::new(RateLimitConfig {
            period: Duration::from_millis(20),
            burst: 1,
            enabled: true,
        });
        let ctx = Context::with_timeout(Duration::from_secs(5));

        for _ in 0..3 {
            limiter.acquire(&ctx).await.unwrap();
        }
    }

    #[test]
    fn test_disabled_limiter_never_blocks() {
        let limiter = RateLimiter::unlimited();
        for _ in 0..100 {
            assert!(limiter.try_acquire());
        }
    }

    #[test]
    fn test_shared_bucket_across_handles() {
        let limiter = Arc::new(slow_limiter(1));
        let other = limiter.clone();

        assert!(limiter.try_acquire());
        assert!(!other.try_acquire());
    }
}
