//! Tetra League leaderboard types.

use serde::{Deserialize, Serialize};

use crate::cutoffs::{RankRange, compute_cutoffs};
use crate::error::TetrioError;
use crate::types::envelope::CacheInfo;
use crate::types::users::PartialUser;

/// League statistics carried by leaderboard entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PartialTlStats {
    /// 1-based position on the leaderboard, -1 if unranked.
    ///
    /// Not returned by the API for the full leaderboard list; it is filled in
    /// by position when the list is decoded.
    pub standing: i64,
    /// League games played.
    pub gamesplayed: u32,
    /// League games won.
    pub gameswon: u32,
    /// Tetra Rating.
    pub rating: f64,
    /// Current rank label, e.g. `ss`.
    pub rank: String,
    /// Best rank ever reached.
    pub bestrank: Option<String>,
    /// Glicko-2 rating.
    pub glicko: Option<f64>,
    /// Glicko-2 rating deviation.
    pub rd: Option<f64>,
    /// Average attack per minute.
    pub apm: Option<f64>,
    /// Average pieces per second.
    pub pps: Option<f64>,
    /// Average versus score.
    pub vs: Option<f64>,
    /// Whether the rating deviation is growing from inactivity.
    pub decaying: Option<bool>,
}

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeagueUser {
    /// User id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Lowercase username.
    pub username: String,
    /// Account role.
    #[serde(default)]
    pub role: String,
    /// Experience points.
    #[serde(default)]
    pub xp: Option<f64>,
    /// ISO country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Whether the user currently supports the game.
    #[serde(default)]
    pub supporter: bool,
    /// Whether the account is verified.
    #[serde(default)]
    pub verified: Option<bool>,
    /// League statistics.
    #[serde(default)]
    pub league: PartialTlStats,
}

impl LeagueUser {
    /// The minimal reference to this user.
    pub fn partial(&self) -> PartialUser {
        PartialUser {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }

    /// Tetra Rating shortcut.
    pub fn rating(&self) -> f64 {
        self.league.rating
    }

    /// Case-insensitive country match; entries without a country match `""`.
    pub fn is_from(&self, country: &str) -> bool {
        self.country
            .as_deref()
            .unwrap_or_default()
            .eq_ignore_ascii_case(country)
    }
}

/// One full download of the global leaderboard.
///
/// Entries are ordered by rating, best first; `users[0]` has standing 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardSnapshot {
    /// Leaderboard entries.
    pub users: Vec<LeagueUser>,
    /// Cache window the snapshot was served under.
    pub cache: CacheInfo,
}

impl LeaderboardSnapshot {
    /// Build a snapshot, assigning standings by position.
    pub fn new(mut users: Vec<LeagueUser>, cache: CacheInfo) -> Self {
        for (index, user) in users.iter_mut().enumerate() {
            user.league.standing = index as i64 + 1;
        }
        Self { users, cache }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Entries in standing order.
    pub fn iter(&self) -> std::slice::Iter<'_, LeagueUser> {
        self.users.iter()
    }

    /// Entries from one country, keeping their global standings.
    pub fn by_country(&self, country: &str) -> Vec<LeagueUser> {
        self.users
            .iter()
            .filter(|user| user.is_from(country))
            .cloned()
            .collect()
    }

    /// Rank bands of this snapshot, borrowing its entries.
    pub fn cutoffs(&self) -> Result<Vec<RankRange<'_>>, TetrioError> {
        compute_cutoffs(&self.users)
    }
}

impl<'a> IntoIterator for &'a LeaderboardSnapshot {
    type Item = &'a LeagueUser;
    type IntoIter = std::slice::Iter<'a, LeagueUser>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}
