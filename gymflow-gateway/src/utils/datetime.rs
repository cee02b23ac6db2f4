//! Datetime serde helpers for the backend's loose timestamp formats.
//!
//! The backend is inconsistent about `dateVisite`: depending on the code
//! path it returns RFC3339 (`2024-03-01T09:30:00Z`), a space-separated SQL
//! timestamp (`2024-03-01 09:30:00`), or a bare date (`2024-03-01`).
//! Serialization always emits RFC3339.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses any of the timestamp shapes the backend emits.
pub(crate) fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from any of the backend's timestamp shapes.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse_flexible(&s).ok_or_else(|| Error::custom(format!("Unrecognized timestamp: {s}")))
}

/// `Option<DateTime<Utc>>` serde helpers.
pub mod option {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, parse_flexible};

    /// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<DateTime<Utc>>`, treating `null`, a missing
    /// value, and an empty string all as `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse_flexible(&s)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("Unrecognized timestamp: {s}"))),
        }
    }
}
