//! Custom serde helpers for the TETR.IO wire formats.
//!
//! The API mixes epoch-millisecond integers, RFC 3339 strings and `null`s for
//! the same logical fields. These modules keep the domain types plain.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Serialize/deserialize an [`OffsetDateTime`] as integer epoch milliseconds.
///
/// `null` decodes to the Unix epoch. Millisecond values round-trip exactly.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use time::OffsetDateTime;
/// use tetrio_api_client::types::serde_helpers::epoch_millis;
///
/// #[derive(Serialize, Deserialize)]
/// struct Stamp {
///     #[serde(with = "epoch_millis")]
///     at: OffsetDateTime,
/// }
///
/// let stamp: Stamp = serde_json::from_str(r#"{"at":1700000000123}"#).unwrap();
/// assert_eq!(serde_json::to_string(&stamp).unwrap(), r#"{"at":1700000000123}"#);
/// ```
pub mod epoch_millis {
    use super::*;

    /// Convert epoch milliseconds to a timestamp.
    pub fn from_millis(millis: i64) -> Result<OffsetDateTime, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
    }

    /// Convert a timestamp to epoch milliseconds, truncating sub-millisecond precision.
    pub fn to_millis(value: OffsetDateTime) -> i64 {
        (value.unix_timestamp_nanos() / 1_000_000) as i64
    }

    /// Serialize as an integer.
    pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(to_millis(*value))
    }

    /// Deserialize an integer or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            Some(millis) => from_millis(millis).map_err(serde::de::Error::custom),
            None => Ok(OffsetDateTime::UNIX_EPOCH),
        }
    }
}

/// Deserialize `null` as `T::default()`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use tetrio_api_client::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize)]
/// struct Profile {
///     #[serde(deserialize_with = "null_as_default::deserialize", default)]
///     bio: String,
/// }
///
/// let profile: Profile = serde_json::from_str(r#"{"bio":null}"#).unwrap();
/// assert!(profile.bio.is_empty());
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize a value, mapping `null` to the default.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Serialize/deserialize an optional RFC 3339 timestamp.
///
/// Missing, `null` and unparseable values all decode to `None`; account
/// timestamps are absent for old and anonymous accounts.
pub mod lenient_rfc3339 {
    use super::*;

    /// Serialize as an RFC 3339 string or `null`.
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => ts
                .format(&Rfc3339)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize, never failing on bad input.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[derive(Serialize, Deserialize, Debug)]
    struct Millis {
        #[serde(with = "epoch_millis")]
        at: OffsetDateTime,
    }

    #[derive(Serialize, Deserialize, Debug)]
    struct Stamp {
        #[serde(with = "lenient_rfc3339", default)]
        ts: Option<OffsetDateTime>,
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        for millis in [0_i64, 1, 1_592_000_000_123, -86_400_001, 4_102_444_800_999] {
            let json = format!(r#"{{"at":{millis}}}"#);
            let parsed: Millis = serde_json::from_str(&json).unwrap();
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
    }

    #[test]
    fn test_epoch_millis_null_is_epoch() {
        let parsed: Millis = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(parsed.at, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_epoch_millis_rejects_strings() {
        assert!(serde_json::from_str::<Millis>(r#"{"at":"soon"}"#).is_err());
    }

    #[test]
    fn test_lenient_rfc3339() {
        let parsed: Stamp = serde_json::from_str(r#"{"ts":"2020-06-15T12:30:00.5Z"}"#).unwrap();
        assert_eq!(parsed.ts, Some(datetime!(2020-06-15 12:30:00.5 UTC)));

        let parsed: Stamp = serde_json::from_str(r#"{"ts":"yesterday"}"#).unwrap();
        assert!(parsed.ts.is_none());

        let parsed: Stamp = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.ts.is_none());
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Deserialize)]
        struct Test {
            #[serde(deserialize_with = "null_as_default::deserialize", default)]
            count: u32,
        }

        let test: Test = serde_json::from_str(r#"{"count":null}"#).unwrap();
        assert_eq!(test.count, 0);
        let test: Test = serde_json::from_str(r#"{"count":3}"#).unwrap();
        assert_eq!(test.count, 3);
    }
}
