//! TETR.IO REST API client.
//!
//! [`TetrioRestClient`] covers user lookup, user search, recent matches and
//! the league leaderboard. All requests go through one rate limited fetch
//! path and one envelope decoder.
//!
//! # Trait-based API
//!
//! The [`TetrioApi`] trait abstracts the operations for mocks and wrappers.
//!
//! ```rust,ignore
//! use tetrio_api_client::Context;
//! use tetrio_api_client::rest::{TetrioApi, TetrioRestClient};
//!
//! async fn rating_of<C: TetrioApi>(client: &C, name: &str) -> Result<f64, tetrio_api_client::TetrioError> {
//!     let user = client.get_user(&Context::background(), name).await?;
//!     Ok(user.league.stats.rating)
//! }
//! ```

mod client;
mod endpoints;
mod leaderboard;
mod matches;
mod traits;
mod users;

pub(crate) use client::{get_checked, http_client};
pub use client::{ENV_API_BASE, ENV_CACHE_PATH, ENV_SESSION_ID, TetrioRestClient, TetrioRestClientBuilder};
pub use endpoints::*;
pub use traits::TetrioApi;
