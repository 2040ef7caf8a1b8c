//! Recent Tetra League matches.

use crate::context::Context;
use crate::error::TetrioError;
use crate::rest::TetrioRestClient;
use crate::rest::endpoints;
use crate::types::{GameRecord, LeagueRecord};

impl TetrioRestClient {
    /// Recent Tetra League matches of the user with id `user_id`.
    ///
    /// Every record must be a decisive two player match; one that is not
    /// fails the whole call with [`TetrioError::NotMultiplayerRecord`] or
    /// [`TetrioError::AmbiguousRecord`].
    pub async fn get_matches(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> Result<Vec<LeagueRecord>, TetrioError> {
        let records: Vec<GameRecord> = self.get(ctx, &endpoints::recent_matches(user_id)).await?;
        records.into_iter().map(LeagueRecord::try_from).collect()
    }
}
