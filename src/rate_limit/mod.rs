//! Rate limiting for the TETR.IO API.
//!
//! The API throttles by source address, not by session. Every request a
//! process makes therefore has to draw from one shared token bucket: build a
//! single [`RateLimiter`], wrap it in an `Arc`, and hand it to every client
//! and session.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tetrio_api_client::rate_limit::{RateLimitConfig, RateLimiter};
//! use tetrio_api_client::rest::TetrioRestClient;
//!
//! let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));
//!
//! // Both clients share one request budget.
//! let first = TetrioRestClient::builder().rate_limiter(limiter.clone()).build();
//! let second = TetrioRestClient::builder().rate_limiter(limiter).build();
//! # let _ = (first, second);
//! ```

mod limiter;

pub use limiter::RateLimiter;

use std::time::Duration;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Time it takes to refill one token.
    pub period: Duration,
    /// Bucket capacity.
    pub burst: u32,
    /// Whether to enable rate limiting.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            period: limits::PERIOD,
            burst: limits::BURST,
            enabled: true,
        }
    }
}

impl RateLimitConfig {
    /// A configuration that admits every request immediately.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Default request pacing.
pub mod limits {
    use std::time::Duration;

    /// One token per second.
    pub const PERIOD: Duration = Duration::from_secs(1);
    /// Bucket capacity.
    pub const BURST: u32 = 1;
}
