//! Fetcher for the league history source.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use crate::context::Context;
use crate::error::TetrioError;
use crate::history::HISTORY_BASE_URL;
use crate::history::reader::HistoryReader;
use crate::history::record::Record;
use crate::rate_limit::RateLimiter;
use crate::rest::{TetrioRestClient, get_checked, http_client};

/// Length of a TETR.IO user id.
const UID_LEN: usize = 24;

/// Client for the third-party league history CSV source.
///
/// Requests draw from the same limiter as the REST client they were built
/// from. No session header is sent.
#[derive(Clone)]
pub struct HistoryClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl HistoryClient {
    /// A history client sharing `limiter`.
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            http_client: http_client(None, None),
            base_url: HISTORY_BASE_URL.to_string(),
            limiter,
        }
    }

    /// A history client sharing the limiter of `client`.
    pub fn from_rest(client: &TetrioRestClient) -> Self {
        Self::new(client.rate_limiter().clone())
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url: String = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// The raw CSV history of `uid`.
    pub async fn raw_data(&self, ctx: &Context, uid: &str) -> Result<Vec<u8>, TetrioError> {
        if !is_valid_uid(uid) {
            return Err(TetrioError::InvalidUid(uid.to_string()));
        }

        let url = Url::parse(&self.base_url)?.join(uid)?;
        let response = match get_checked(&self.http_client, &self.limiter, ctx, url, None).await {
            Err(TetrioError::Transport { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(TetrioError::HistoryNotFound(uid.to_string()));
            }
            result => result?,
        };

        let body = ctx.run(response.bytes()).await??;
        Ok(body.to_vec())
    }

    /// Every history row of `uid`, oldest first.
    pub async fn all_records(&self, ctx: &Context, uid: &str) -> Result<Vec<Record>, TetrioError> {
        let body = self.raw_data(ctx, uid).await?;
        HistoryReader::new(body.as_slice()).all(true)
    }
}

impl std::fmt::Debug for HistoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn is_valid_uid(uid: &str) -> bool {
    uid.len() == UID_LEN && uid.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_validation() {
        assert!(is_valid_uid("5e32fc85ab319c2ab1beb07c"));
        assert!(is_valid_uid("5E32FC85AB319C2AB1BEB07C"));
        assert!(!is_valid_uid("5e32fc85ab319c2ab1beb07"));
        assert!(!is_valid_uid("5e32fc85ab319c2ab1beb07g"));
        assert!(!is_valid_uid("../../../../etc/passwd000"));
    }

    #[tokio::test]
    async fn test_invalid_uid_makes_no_request() {
        let client = HistoryClient::new(Arc::new(RateLimiter::unlimited()))
            .base_url("http://127.0.0.1:9");
        let err = client
            .all_records(&Context::background(), "osk")
            .await
            .unwrap_err();
        assert!(matches!(err, TetrioError::InvalidUid(_)));
    }
}
