//! Persisted leaderboard cache.
//!
//! The full leaderboard is the largest and most requested resource, and the
//! server only refreshes it every few minutes. [`SnapshotCache`] keeps the
//! last raw envelope on disk and serves it until the server-declared
//! `cached_until` passes.

mod snapshot;

pub use snapshot::SnapshotCache;

use std::path::PathBuf;

/// File name of the persisted leaderboard inside the temp directory.
pub const DEFAULT_CACHE_FILE: &str = "tetrio-leaderboard-dump.json";

/// Well-known location in the temp directory.
///
/// Only concurrent callers inside one process are serialized; separate
/// processes pointed at the same file must not refresh it at the same time.
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_FILE)
}
