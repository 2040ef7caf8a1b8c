//! League match records collapsed into winner and loser.

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::TetrioError;
use crate::types::users::PartialUser;
use crate::types::versus::{GameRecord, Handling, LeagueEndContext, VersusStats};

/// A finished Tetra League match.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueRecord {
    /// Replay id.
    pub replay_id: String,
    /// When the match ended.
    pub ts: Option<OffsetDateTime>,
    /// Whether one side disconnected.
    pub is_forfeit: bool,
    /// The winning participant.
    pub winner: LeaguePlayer,
    /// The losing participant.
    pub loser: LeaguePlayer,
}

/// One side of a league match.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaguePlayer {
    /// Participant.
    pub user: PartialUser,
    /// Rounds won.
    pub wins: u32,
    /// Total key inputs.
    pub inputs: u32,
    /// Total pieces placed.
    pub pieces_placed: u32,
    /// Handling used for the match.
    pub handling: Handling,
    /// Whole-match statistics.
    pub stats: VersusStats,
    /// Statistics of each round.
    pub round_stats: Vec<VersusStats>,
}

impl From<LeagueEndContext> for LeaguePlayer {
    fn from(ctx: LeagueEndContext) -> Self {
        let points = ctx.points;
        let apms = points.secondary_avg_tracking;
        let ppss = points.tertiary_avg_tracking;
        let vss = points.extra_avg_tracking.vs_score;

        let rounds = apms.len().max(ppss.len()).max(vss.len());
        let round_stats = (0..rounds)
            .map(|i| VersusStats {
                apm: apms.get(i).copied().unwrap_or_default(),
                pps: ppss.get(i).copied().unwrap_or_default(),
                vs: vss.get(i).copied().unwrap_or_default(),
            })
            .collect();

        Self {
            user: PartialUser {
                id: ctx.id,
                username: ctx.username,
            },
            wins: ctx.wins,
            inputs: ctx.inputs,
            pieces_placed: ctx.pieces_placed,
            handling: ctx.handling,
            stats: VersusStats {
                apm: points.secondary,
                pps: points.tertiary,
                vs: points.extra.vs,
            },
            round_stats,
        }
    }
}

impl TryFrom<GameRecord> for LeagueRecord {
    type Error = TetrioError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        if !record.is_multi {
            return Err(TetrioError::NotMultiplayerRecord);
        }

        let contexts: Vec<LeagueEndContext> = serde_json::from_value(record.end_context)
            .map_err(|e| TetrioError::Malformed(format!("league end context: {e}")))?;
        let [first, second]: [LeagueEndContext; 2] = contexts.try_into().map_err(
            |contexts: Vec<LeagueEndContext>| {
                TetrioError::Malformed(format!(
                    "league end context has {} participants, expected 2",
                    contexts.len()
                ))
            },
        )?;

        if first.success == second.success {
            return Err(TetrioError::AmbiguousRecord);
        }

        let is_forfeit = first.active != second.active;
        let (winner, loser) = if first.success {
            (first, second)
        } else {
            (second, first)
        };

        Ok(Self {
            replay_id: record.replay_id,
            ts: record.ts,
            is_forfeit,
            winner: winner.into(),
            loser: loser.into(),
        })
    }
}
