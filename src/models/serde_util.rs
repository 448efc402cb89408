//! Deserialization helpers for the quirks of the upstream JSON.

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` as the type's default (empty string, empty list).
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Resolve a naive upstream timestamp, which is US Eastern wall-clock time.
/// In the fall-back overlap the earlier instant wins; a time skipped by the
/// spring-forward gap has no instant and yields `None`.
pub fn eastern_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match New_York.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Upstream timestamps are naive US Eastern (`2023-09-10T13:00:00`) and kept
/// that way. RFC 3339 strings with an offset are converted to Eastern.
pub mod naive_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use chrono_tz::America::New_York;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }

    pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&New_York).naive_local());
        }
        NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| format!("invalid datetime '{raw}': {e}"))
    }
}
