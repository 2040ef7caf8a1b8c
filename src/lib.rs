//! # TETR.IO Client
//!
//! An async Rust client library for the TETR.IO Tetra Channel API.
//!
//! ## Features
//!
//! - User lookup, user search and recent league matches
//! - One rate limiter shared by every session of a process
//! - The full league leaderboard persisted on disk and served until the
//!   server's cache window closes
//! - Percentile rank cutoffs derived from a leaderboard snapshot
//! - League history from the p1nkl0bst3r CSV source
//! - Cancellation and deadlines on every call through [`Context`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tetrio_api_client::Context;
//! use tetrio_api_client::rest::TetrioRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TetrioRestClient::new();
//!     let ctx = Context::with_timeout(std::time::Duration::from_secs(30));
//!
//!     let snapshot = client.get_leaderboard(&ctx).await?;
//!     for band in snapshot.cutoffs()? {
//!         println!("{:>2} above {:.2} TR", band.rank, band.bottom_rating());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod context;
pub mod cutoffs;
pub mod error;
pub mod history;
pub mod rate_limit;
pub mod rest;
pub mod session;
pub mod types;

// Re-export commonly used types at crate root
pub use context::Context;
pub use error::{ErrorKind, TetrioError};
pub use session::SessionId;

/// Result type alias using TetrioError
pub type Result<T> = std::result::Result<T, TetrioError>;
