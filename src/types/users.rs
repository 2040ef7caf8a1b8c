//! User profile types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::league::PartialTlStats;
use crate::types::serde_helpers::{lenient_rfc3339, null_as_default};

/// Minimal user reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PartialUser {
    /// User id (24 hex digits).
    #[serde(rename = "_id", default, deserialize_with = "null_as_default::deserialize")]
    pub id: String,
    /// Lowercase username.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub username: String,
}

/// Full user profile as returned by `/users/<name>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FullUser {
    /// User id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Lowercase username.
    pub username: String,
    /// Account role (`user`, `bot`, `banned`, ...).
    #[serde(default)]
    pub role: String,
    /// Account creation time; missing for very old accounts.
    #[serde(default, with = "lenient_rfc3339")]
    pub ts: Option<OffsetDateTime>,
    /// Operator of a bot account.
    #[serde(default)]
    pub botmaster: Option<String>,
    /// Profile badges.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub badges: Vec<Badge>,
    /// Experience points.
    #[serde(default)]
    pub xp: f64,
    /// Online games played, -1 if hidden.
    #[serde(default)]
    pub gamesplayed: i64,
    /// Online games won, -1 if hidden.
    #[serde(default)]
    pub gameswon: i64,
    /// Seconds spent playing, -1 if hidden.
    #[serde(default)]
    pub gametime: f64,
    /// ISO country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Whether the account is in bad standing.
    #[serde(default)]
    pub badstanding: bool,
    /// Whether the user currently supports the game.
    #[serde(default)]
    pub supporter: bool,
    /// Supporter tier, 0 if none.
    #[serde(default)]
    pub supporter_tier: u32,
    /// Whether the account is verified.
    #[serde(default)]
    pub verified: bool,
    /// Tetra League standing and statistics.
    pub league: FullTlStats,
    /// Avatar revision, if an avatar is set.
    #[serde(default)]
    pub avatar_revision: Option<i64>,
    /// Banner revision, if a banner is set.
    #[serde(default)]
    pub banner_revision: Option<i64>,
    /// Profile text.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bio: String,
    /// Number of friends.
    #[serde(default)]
    pub friend_count: Option<u32>,
    /// Linked third-party accounts.
    #[serde(default)]
    pub connections: Connections,
    /// Staff distinguishment, if any.
    #[serde(default)]
    pub distinguishment: Option<Distinguishment>,
}

impl FullUser {
    /// The minimal reference to this user.
    pub fn partial(&self) -> PartialUser {
        PartialUser {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Tetra League statistics of a full profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FullTlStats {
    /// Statistics shared with leaderboard entries.
    #[serde(flatten)]
    pub stats: PartialTlStats,
    /// Next rank up, if any.
    #[serde(default)]
    pub next_rank: Option<String>,
    /// Previous rank down, if any.
    #[serde(default)]
    pub prev_rank: Option<String>,
    /// Rank the user's percentile corresponds to.
    #[serde(default)]
    pub percentile_rank: String,
    /// Standing within the user's country, -1 if unranked.
    #[serde(default)]
    pub standing_local: i64,
    /// Standing at which the next rank starts, -1 if none.
    #[serde(default)]
    pub next_at: i64,
    /// Standing at which the previous rank starts, -1 if none.
    #[serde(default)]
    pub prev_at: i64,
    /// Fraction of ranked players at or above this user.
    #[serde(default)]
    pub percentile: f64,
}

/// A profile badge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Badge {
    /// Badge id.
    pub id: String,
    /// Badge label.
    #[serde(default)]
    pub label: String,
    /// When the badge was awarded.
    #[serde(default, with = "lenient_rfc3339")]
    pub ts: Option<OffsetDateTime>,
}

/// Linked third-party accounts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Connections {
    /// Linked Discord account.
    #[serde(default)]
    pub discord: Option<DiscordInfo>,
}

/// A linked Discord account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscordInfo {
    /// Discord snowflake.
    pub id: String,
    /// Discord username.
    #[serde(default)]
    pub username: String,
}

/// Staff distinguishment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Distinguishment {
    /// Distinguishment type.
    #[serde(rename = "type")]
    pub kind: String,
}
