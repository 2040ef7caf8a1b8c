//! TETR.IO REST API client implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cache::{SnapshotCache, default_cache_path};
use crate::context::Context;
use crate::error::{MAX_ERROR_BODY, TetrioError};
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::rest::endpoints::{SESSION_HEADER, TETRIO_BASE_URL};
use crate::rest::traits::TetrioApi;
use crate::session::SessionId;
use crate::types::envelope::decode;
use crate::types::{FullUser, LeaderboardSnapshot, LeagueRecord, LeagueUser, PartialUser};

/// Environment variable overriding the API base URL.
pub const ENV_API_BASE: &str = "TETRIO_API_BASE";
/// Environment variable overriding the leaderboard cache file.
pub const ENV_CACHE_PATH: &str = "TETRIO_CACHE_PATH";
/// Environment variable fixing the session id.
pub const ENV_SESSION_ID: &str = "TETRIO_SESSION_ID";

/// The TETR.IO REST API client.
///
/// One client is one session: every request carries the same
/// `X-Session-Id`. Cloning keeps the session; [`TetrioRestClient::new_session`]
/// starts a new one. Either way the rate limiter and the leaderboard cache
/// stay shared.
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
///     let ctx = Context::background();
///
///     let user = client.get_user(&ctx, "osk").await?;
///     println!("{} is rated {}", user.username, user.league.stats.rating);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TetrioRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    session_id: SessionId,
    limiter: Arc<RateLimiter>,
    cache: Arc<SnapshotCache>,
}

impl TetrioRestClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> TetrioRestClientBuilder {
        TetrioRestClientBuilder::new()
    }

    /// A client with a freshly generated session id, sharing everything else.
    pub fn new_session(&self) -> Self {
        Self {
            session_id: SessionId::generate(),
            ..self.clone()
        }
    }

    /// The id sent with every request of this session.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The shared request limiter.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// The shared leaderboard cache.
    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    /// Issue a rate limited GET and check its status.
    ///
    /// The returned response is a 200 whose body has not been read yet.
    pub(crate) async fn fetch(
        &self,
        ctx: &Context,
        path: &str,
    ) -> Result<reqwest::Response, TetrioError> {
        let url = Url::parse(&format!("{}{}", self.base_url, path))?;
        get_checked(
            &self.http_client,
            &self.limiter,
            ctx,
            url,
            Some(&self.session_id),
        )
        .await
    }

    /// Fetch `path` and decode its envelope into `T`.
    pub(crate) async fn get<T>(&self, ctx: &Context, path: &str) -> Result<T, TetrioError>
    where
        T: DeserializeOwned,
    {
        let response = self.fetch(ctx, path).await?;
        let body = ctx.run(response.bytes()).await??;
        decode(&body)
    }
}

/// Shared GET path for every client of the crate.
///
/// Waits for a limiter token, sends the request under `ctx` and turns any
/// status other than 200 into [`TetrioError::Transport`].
pub(crate) async fn get_checked(
    http_client: &ClientWithMiddleware,
    limiter: &RateLimiter,
    ctx: &Context,
    url: Url,
    session_id: Option<&SessionId>,
) -> Result<reqwest::Response, TetrioError> {
    limiter.acquire(ctx).await?;

    debug!(url = %url, "GET");
    let mut request = http_client.get(url);
    if let Some(id) = session_id.filter(|id| !id.is_empty()) {
        request = request.header(SESSION_HEADER, id.as_str());
    }

    let response = ctx.run(request.send()).await??;
    if response.status() != StatusCode::OK {
        return Err(capture_status_error(ctx, response).await);
    }
    Ok(response)
}

/// Status line, headers and at most [`MAX_ERROR_BODY`] body bytes.
async fn capture_status_error(ctx: &Context, mut response: reqwest::Response) -> TetrioError {
    let status = response.status();

    let mut content = format!("{:?} {}\r\n", response.version(), status).into_bytes();
    for (name, value) in response.headers() {
        content.extend_from_slice(name.as_str().as_bytes());
        content.extend_from_slice(b": ");
        content.extend_from_slice(value.as_bytes());
        content.extend_from_slice(b"\r\n");
    }
    content.extend_from_slice(b"\r\n");

    let mut body_len = 0;
    while body_len < MAX_ERROR_BODY {
        match ctx.run(response.chunk()).await {
            Err(cancelled) => return cancelled,
            Ok(Ok(Some(chunk))) => {
                let take = chunk.len().min(MAX_ERROR_BODY - body_len);
                content.extend_from_slice(&chunk[..take]);
                body_len += take;
            }
            Ok(Ok(None)) => break,
            Ok(Err(err)) => {
                debug!(error = %err, "error body cut short");
                break;
            }
        }
    }

    debug!(status = status.as_u16(), "non 200 response");
    TetrioError::Transport {
        status: status.as_u16(),
        content,
    }
}

impl Default for TetrioRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TetrioRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TetrioRestClient")
            .field("base_url", &self.base_url)
            .field("session_id", &self.session_id)
            .field("cache_path", &self.cache.path())
            .finish()
    }
}

/// Builder for [`TetrioRestClient`].
pub struct TetrioRestClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    session_id: Option<SessionId>,
    limiter: Option<Arc<RateLimiter>>,
    rate_limit: RateLimitConfig,
    cache: Option<Arc<SnapshotCache>>,
    cache_path: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl TetrioRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: TETRIO_BASE_URL.to_string(),
            user_agent: None,
            session_id: None,
            limiter: None,
            rate_limit: RateLimitConfig::default(),
            cache: None,
            cache_path: None,
            timeout: None,
        }
    }

    /// A builder seeded from `TETRIO_API_BASE`, `TETRIO_CACHE_PATH` and
    /// `TETRIO_SESSION_ID`, where set.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(base_url) = std::env::var(ENV_API_BASE) {
            builder = builder.base_url(base_url);
        }
        if let Ok(path) = std::env::var(ENV_CACHE_PATH) {
            builder = builder.cache_path(path);
        }
        if let Ok(id) = std::env::var(ENV_SESSION_ID) {
            builder = builder.session_id(SessionId::new(id));
        }
        builder
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a fixed session id instead of a generated one.
    ///
    /// An empty id sends no session header at all.
    pub fn session_id(mut self, id: SessionId) -> Self {
        self.session_id = Some(id);
        self
    }

    /// Share an existing limiter. Takes precedence over [`Self::rate_limit`].
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Configure the limiter created for this client.
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Share an existing leaderboard cache. Takes precedence over
    /// [`Self::cache_path`].
    pub fn cache(mut self, cache: Arc<SnapshotCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Persist the leaderboard at `path` instead of the temp directory.
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Set a timeout for each whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> TetrioRestClient {
        TetrioRestClient {
            http_client: http_client(self.user_agent, self.timeout),
            base_url: self.base_url,
            session_id: self.session_id.unwrap_or_default(),
            limiter: self
                .limiter
                .unwrap_or_else(|| Arc::new(RateLimiter::new(self.rate_limit))),
            cache: self.cache.unwrap_or_else(|| {
                let path = self.cache_path.unwrap_or_else(default_cache_path);
                Arc::new(SnapshotCache::new(path))
            }),
        }
    }
}

impl Default for TetrioRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client with tracing middleware and no retry layer.
pub(crate) fn http_client(
    user_agent: Option<String>,
    timeout: Option<Duration>,
) -> ClientWithMiddleware {
    let mut headers = HeaderMap::new();
    let user_agent = user_agent
        .unwrap_or_else(|| format!("tetrio-api-client/{}", env!("CARGO_PKG_VERSION")));
    let header_value = HeaderValue::from_str(&user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("tetrio-api-client"));
    headers.insert(USER_AGENT, header_value);

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let reqwest_client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

    ClientBuilder::new(reqwest_client)
        .with(TracingMiddleware::default())
        .build()
}

// TetrioApi trait implementation.

impl TetrioApi for TetrioRestClient {
    async fn get_user(&self, ctx: &Context, username: &str) -> Result<FullUser, TetrioError> {
        TetrioRestClient::get_user(self, ctx, username).await
    }

    async fn search_user(
        &self,
        ctx: &Context,
        external_id: &str,
    ) -> Result<PartialUser, TetrioError> {
        TetrioRestClient::search_user(self, ctx, external_id).await
    }

    async fn get_matches(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> Result<Vec<LeagueRecord>, TetrioError> {
        TetrioRestClient::get_matches(self, ctx, user_id).await
    }

    async fn get_leaderboard(&self, ctx: &Context) -> Result<LeaderboardSnapshot, TetrioError> {
        TetrioRestClient::get_leaderboard(self, ctx).await
    }

    async fn get_league_lb(
        &self,
        ctx: &Context,
        country: &str,
    ) -> Result<Vec<LeagueUser>, TetrioError> {
        TetrioRestClient::get_league_lb(self, ctx, country).await
    }
}
