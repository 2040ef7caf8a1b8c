//! Wire and domain types used across the TETR.IO client library.

pub mod envelope;
pub mod league;
pub mod records;
pub mod serde_helpers;
pub mod users;
pub mod versus;

pub use envelope::{CacheInfo, ResponseEnvelope, decode, decode_with_cache, unwrap_payload};
pub use league::{LeaderboardSnapshot, LeagueUser, PartialTlStats};
pub use records::{LeaguePlayer, LeagueRecord};
pub use users::{Badge, Connections, DiscordInfo, Distinguishment, FullTlStats, FullUser, PartialUser};
pub use versus::{GameRecord, Handling, VersusStats};
