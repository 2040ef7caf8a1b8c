//! Tetra League leaderboard, served through the snapshot cache.

use crate::context::Context;
use crate::error::TetrioError;
use crate::rest::TetrioRestClient;
use crate::rest::endpoints::LEAGUE_LEADERBOARD;
use crate::types::{LeaderboardSnapshot, LeagueUser};

impl TetrioRestClient {
    /// The full league leaderboard, best rated first.
    ///
    /// Served from the persisted snapshot while the server's cache window is
    /// open, refetched otherwise. Concurrent callers share one refetch.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tetrio_api_client::Context;
    /// use tetrio_api_client::rest::TetrioRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = TetrioRestClient::new();
    ///     let snapshot = client.get_leaderboard(&Context::background()).await?;
    ///
    ///     for band in snapshot.cutoffs()? {
    ///         println!("{:>2}: {:.2}", band.rank, band.bottom_rating());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_leaderboard(&self, ctx: &Context) -> Result<LeaderboardSnapshot, TetrioError> {
        self.cache()
            .get_or_fetch(ctx, || self.fetch(ctx, LEAGUE_LEADERBOARD))
            .await
    }

    /// Leaderboard entries whose country matches `country`, ignoring case.
    ///
    /// Entries keep their global standing. An empty `country` selects the
    /// entries with no country set.
    pub async fn get_league_lb(
        &self,
        ctx: &Context,
        country: &str,
    ) -> Result<Vec<LeagueUser>, TetrioError> {
        let snapshot = self.get_leaderboard(ctx).await?;
        Ok(snapshot.by_country(country))
    }

    /// Drop the persisted leaderboard so the next read refetches it.
    pub async fn invalidate_leaderboard(&self, ctx: &Context) -> Result<(), TetrioError> {
        self.cache().invalidate(ctx).await
    }
}
