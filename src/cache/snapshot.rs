//! Single-entry, single-lock leaderboard cache.

use std::future::Future;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use time::OffsetDateTime;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::context::Context;
use crate::error::TetrioError;
use crate::types::envelope::{decode_with_cache, peek_cache_info};
use crate::types::{LeaderboardSnapshot, LeagueUser};

/// Persisted copy of the last leaderboard envelope.
///
/// One in-process lock guards the file: at most one check-or-refill sequence runs at a
/// time, so concurrent callers on an expired cache cause exactly one upstream
/// fetch and then all read the refreshed copy.
#[derive(Debug)]
pub struct SnapshotCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SnapshotCache {
    /// Cache backed by the file at `path`, created on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the persisted copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serve the persisted snapshot, refilling it through `fetch` if expired.
    ///
    /// `fetch` must return the raw leaderboard response. Its body is written
    /// to disk as it is read, so the snapshot is durable by the time it is
    /// returned. A failed refill leaves the file empty.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        ctx: &Context,
        fetch: F,
    ) -> Result<LeaderboardSnapshot, TetrioError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, TetrioError>>,
    {
        let _guard = ctx.run(self.lock.lock()).await?;

        let mut file = self.open().await?;
        let mut persisted = Vec::new();
        file.read_to_end(&mut persisted).await?;

        if !persisted.is_empty() && !is_expired(&persisted) {
            debug!(path = %self.path.display(), "serving cached leaderboard");
            let (users, cache) = decode_with_cache::<Vec<LeagueUser>>(&persisted)?;
            return Ok(LeaderboardSnapshot::new(users, cache));
        }

        debug!(path = %self.path.display(), "leaderboard cache expired, refetching");
        match refill(ctx, &mut file, fetch).await {
            Ok((users, cache)) => Ok(LeaderboardSnapshot::new(users, cache)),
            Err(err) => {
                if let Err(truncate_err) = file.set_len(0).await {
                    warn!(error = %truncate_err, "could not clear leaderboard cache after failed refill");
                }
                Err(err)
            }
        }
    }

    /// Drop the persisted copy so the next read refetches.
    pub async fn invalidate(&self, ctx: &Context) -> Result<(), TetrioError> {
        let _guard = ctx.run(self.lock.lock()).await?;
        let file = self.open().await?;
        file.set_len(0).await?;
        Ok(())
    }

    async fn open(&self) -> Result<File, TetrioError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .await?;
        Ok(file)
    }
}

fn is_expired(persisted: &[u8]) -> bool {
    match peek_cache_info(persisted) {
        Ok(cache) => cache.is_expired_at(OffsetDateTime::now_utc()),
        Err(err) => {
            warn!(error = %err, "discarding unreadable leaderboard cache");
            true
        }
    }
}

async fn refill<F, Fut>(
    ctx: &Context,
    file: &mut File,
    fetch: F,
) -> Result<(Vec<LeagueUser>, crate::types::CacheInfo), TetrioError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, TetrioError>>,
{
    file.set_len(0).await?;
    file.seek(SeekFrom::Start(0)).await?;

    let response = fetch().await?;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = ctx.run(stream.next()).await? {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        body.extend_from_slice(&chunk);
    }
    file.flush().await?;

    decode_with_cache(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("lb.json"));

        cache.invalidate(&Context::background()).await.unwrap();
        let meta = std::fs::metadata(cache.path()).unwrap();
        assert_eq!(meta.len(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_context_does_not_take_lock() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("lb.json"));
        let _held = cache.lock.lock().await;

        let ctx = Context::with_timeout(std::time::Duration::from_millis(30));
        let result = cache.invalidate(&ctx).await;
        assert!(matches!(result, Err(TetrioError::Cancelled)));
    }

    #[test]
    fn test_garbage_is_expired() {
        assert!(is_expired(b"{\"success\":true,\"data\":"));
        assert!(is_expired(b"not json"));
    }
}
