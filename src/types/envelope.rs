//! The generic response envelope and its decoder.
//!
//! Every endpoint answers with
//!
//! ```json
//! {"success": true, "data": {...}, "cache": {"status": "hit", "cached_at": 1, "cached_until": 2}}
//! ```
//!
//! or `{"success": false, "error": "..."}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::{RemoteError, TetrioError};
use crate::types::serde_helpers::epoch_millis;

/// Raw response envelope.
///
/// When `success` is false, `data` must not be interpreted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    /// Whether the request succeeded.
    pub success: bool,
    /// Free-form server error, present when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// The payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Cache window of the payload.
    #[serde(default)]
    pub cache: CacheInfo,
}

/// Server-side cache metadata of a response.
///
/// `[at, until)` is the window during which the payload is current.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheInfo {
    /// When the payload was cached.
    #[serde(rename = "cached_at", with = "epoch_millis", default = "epoch")]
    pub at: OffsetDateTime,
    /// When the payload stops being current.
    #[serde(rename = "cached_until", with = "epoch_millis", default = "epoch")]
    pub until: OffsetDateTime,
    /// Cache status, e.g. `hit` or `miss`.
    #[serde(default)]
    pub status: String,
}

fn epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

impl Default for CacheInfo {
    fn default() -> Self {
        Self {
            at: OffsetDateTime::UNIX_EPOCH,
            until: OffsetDateTime::UNIX_EPOCH,
            status: String::new(),
        }
    }
}

impl CacheInfo {
    /// Length of the cache window.
    pub fn total_duration(&self) -> time::Duration {
        self.until - self.at
    }

    /// Check if the window has closed at `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.until <= now
    }

    /// Check if the window has closed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Whole seconds of the window, rounded up; the `max-age` a CDN may use.
    pub fn max_age_secs(&self) -> i64 {
        let millis = self.total_duration().whole_milliseconds().max(0);
        ((millis + 999) / 1000) as i64
    }

    /// Whole seconds since the payload was cached, never negative.
    pub fn age_secs(&self, now: OffsetDateTime) -> i64 {
        (now - self.at).whole_seconds().max(0)
    }

    /// `Cache-Control` value for forwarding this payload.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age_secs())
    }
}

/// Only the cache metadata of an envelope.
#[derive(Debug, Deserialize)]
struct CacheHeader {
    #[serde(default)]
    cache: CacheInfo,
}

impl ResponseEnvelope {
    /// Parse the envelope shape, without looking at `success`.
    pub fn parse(raw: &[u8]) -> Result<Self, TetrioError> {
        serde_json::from_slice(raw)
            .map_err(|e| TetrioError::Malformed(format!("not a response envelope: {e}")))
    }

    /// Fail with [`TetrioError::Remote`] if the server reported an error.
    pub fn into_success(self) -> Result<Self, TetrioError> {
        if self.success {
            return Ok(self);
        }
        let message = match self.error {
            Some(Value::String(message)) => message,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Err(TetrioError::Remote(RemoteError::new(message)))
    }

    /// Decode the (unwrapped) payload into `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, TetrioError> {
        let data = unwrap_payload(self.data.unwrap_or_default());
        serde_json::from_value(data)
            .map_err(|e| TetrioError::Malformed(format!("unexpected payload: {e}")))
    }
}

/// Remove one level of single-key object wrapping.
///
/// The API usually nests the real payload as `{"users": [...]}` or
/// `{"user": {...}}`. Any object with exactly one key is unwrapped, so a
/// genuine single-field payload would be unwrapped too.
pub fn unwrap_payload(data: Value) -> Value {
    match data {
        Value::Object(map) if map.len() == 1 => map
            .into_iter()
            .next()
            .map(|(_, inner)| inner)
            .unwrap_or_default(),
        other => other,
    }
}

/// Decode a raw response body into `T`.
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T, TetrioError> {
    ResponseEnvelope::parse(raw)?.into_success()?.into_data()
}

/// Decode a raw response body into `T` along with its cache metadata.
pub fn decode_with_cache<T: DeserializeOwned>(raw: &[u8]) -> Result<(T, CacheInfo), TetrioError> {
    let envelope = ResponseEnvelope::parse(raw)?.into_success()?;
    let cache = envelope.cache.clone();
    Ok((envelope.into_data()?, cache))
}

/// Read only the cache metadata of a raw body.
pub fn peek_cache_info(raw: &[u8]) -> Result<CacheInfo, TetrioError> {
    let header: CacheHeader = serde_json::from_slice(raw)
        .map_err(|e| TetrioError::Malformed(format!("unreadable cache metadata: {e}")))?;
    Ok(header.cache)
}
