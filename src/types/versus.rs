//! Multiplayer game record types, as sent by the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::types::serde_helpers::lenient_rfc3339;
use crate::types::users::PartialUser;

/// In-game handling settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Handling {
    /// Auto repeat rate, in frames.
    pub arr: f64,
    /// Delayed auto shift, in frames.
    pub das: f64,
    /// DAS cut delay, in frames.
    pub dcd: f64,
    /// Soft drop factor.
    pub sdf: u32,
    /// Whether hard drops are locked briefly after a piece spawns.
    pub safelock: bool,
    /// Whether DAS is cancelled on direction change.
    pub cancel: bool,
}

/// Aggregate versus statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct VersusStats {
    /// Attack per minute.
    pub apm: f64,
    /// Pieces per second.
    pub pps: f64,
    /// Versus score.
    pub vs: f64,
}

/// A raw entry of a user's recent league stream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameRecord {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Stream the record belongs to.
    #[serde(default)]
    pub stream: String,
    /// Replay id.
    #[serde(rename = "replayid", default)]
    pub replay_id: String,
    /// Uploading user.
    #[serde(default)]
    pub user: PartialUser,
    /// When the game ended.
    #[serde(default, with = "lenient_rfc3339")]
    pub ts: Option<OffsetDateTime>,
    /// Whether this is a multiplayer record.
    #[serde(rename = "ismulti", default)]
    pub is_multi: bool,
    /// Per-participant end state; an array only for multiplayer records.
    #[serde(rename = "endcontext", default)]
    pub end_context: Value,
}

/// End state of one league participant.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeagueEndContext {
    /// Participant's user id.
    pub id: String,
    /// Participant's username.
    pub username: String,
    /// Participant's handling.
    pub handling: Handling,
    /// Whether the participant was still connected at the end.
    pub active: bool,
    /// Whether the participant won the match.
    pub success: bool,
    /// Total key inputs.
    pub inputs: u32,
    /// Total pieces placed.
    #[serde(rename = "piecesplaced")]
    pub pieces_placed: u32,
    /// Rounds won.
    pub wins: u32,
    /// Match statistics.
    pub points: LeaguePoints,
}

/// Match statistics of one participant.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeaguePoints {
    /// Rounds won.
    pub primary: u32,
    /// Attack per minute.
    pub secondary: f64,
    /// Pieces per second.
    pub tertiary: f64,
    /// Extra statistics.
    pub extra: ExtraPoints,
    /// Attack per minute of each round.
    #[serde(rename = "secondaryAvgTracking")]
    pub secondary_avg_tracking: Vec<f64>,
    /// Pieces per second of each round.
    #[serde(rename = "tertiaryAvgTracking")]
    pub tertiary_avg_tracking: Vec<f64>,
    /// Extra per-round statistics.
    #[serde(rename = "extraAvgTracking")]
    pub extra_avg_tracking: ExtraAvgTracking,
}

/// Extra statistics of one participant.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtraPoints {
    /// Versus score.
    pub vs: f64,
}

/// Extra per-round statistics.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtraAvgTracking {
    /// Versus score of each round.
    #[serde(rename = "aggregatestats___vsscore")]
    pub vs_score: Vec<f64>,
}
