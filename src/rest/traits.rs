//! Trait definition for the TETR.IO REST API client.
//!
//! [`TetrioApi`] abstracts the REST operations so callers can be written
//! against a mock or a decorating wrapper instead of the real client.
//!
//! # Example
//!
//! ```rust,ignore
//! use tetrio_api_client::Context;
//! use tetrio_api_client::rest::{TetrioApi, TetrioRestClient};
//!
//! async fn top_player<C: TetrioApi>(client: &C) -> Result<(), tetrio_api_client::TetrioError> {
//!     let snapshot = client.get_leaderboard(&Context::background()).await?;
//!     if let Some(first) = snapshot.users.first() {
//!         println!("#1 is {}", first.username);
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::context::Context;
use crate::error::TetrioError;
use crate::types::{FullUser, LeaderboardSnapshot, LeagueRecord, LeagueUser, PartialUser};

/// Trait defining the TETR.IO REST operations.
pub trait TetrioApi: Send + Sync {
    /// Look up a user by username.
    fn get_user(
        &self,
        ctx: &Context,
        username: &str,
    ) -> impl Future<Output = Result<FullUser, TetrioError>> + Send;

    /// Find the user linked to an external account id.
    fn search_user(
        &self,
        ctx: &Context,
        external_id: &str,
    ) -> impl Future<Output = Result<PartialUser, TetrioError>> + Send;

    /// Recent Tetra League matches of a user.
    fn get_matches(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<LeagueRecord>, TetrioError>> + Send;

    /// The full league leaderboard, served from the shared cache when fresh.
    fn get_leaderboard(
        &self,
        ctx: &Context,
    ) -> impl Future<Output = Result<LeaderboardSnapshot, TetrioError>> + Send;

    /// Leaderboard entries of one country.
    fn get_league_lb(
        &self,
        ctx: &Context,
        country: &str,
    ) -> impl Future<Output = Result<Vec<LeagueUser>, TetrioError>> + Send;
}
