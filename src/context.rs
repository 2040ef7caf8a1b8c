//! Caller-supplied cancellation and deadlines.
//!
//! Every call that can suspend (rate limiter, network, cache lock) takes a
//! [`Context`]. When its token is cancelled or its deadline passes, the
//! pending wait is dropped and the call fails with
//! [`TetrioError::Cancelled`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tetrio_api_client::Context;
//!
//! let ctx = Context::with_timeout(Duration::from_secs(10));
//! let child = ctx.clone();
//! child.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TetrioError;

/// Cancellation signal plus an optional deadline.
///
/// Clones share the same cancellation token.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled on its own.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A context driven by an existing cancellation token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Tighten the deadline to at most `timeout` from now.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if the token fired or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Drive `fut` to completion unless this context is cancelled first.
    ///
    /// On cancellation `fut` is dropped, which aborts whatever it was doing.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, TetrioError> {
        if self.is_cancelled() {
            return Err(TetrioError::Cancelled);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(TetrioError::Cancelled),
            _ = expired => Err(TetrioError::Cancelled),
            output = fut => Ok(output),
        }
    }
}
