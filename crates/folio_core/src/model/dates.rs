//! Date handling for API timestamps.
//!
//! The API emits RFC 3339 timestamps and uses the zero time
//! (`0001-01-01T00:00:00Z`) for "no date". Both the zero time and blank
//! strings decode to `None`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Returns `None` for blank input, unparsable input and the zero time.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })?;

    if parsed.timestamp() <= zero_time_timestamp() {
        return None;
    }
    Some(parsed)
}

/// Formats a date as `January 5, 2024`.
pub fn format_long(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Formats a date as `1/5/2024`.
pub fn format_short(value: &DateTime<Utc>) -> String {
    value.format("%-m/%-d/%Y").to_string()
}

fn zero_time_timestamp() -> i64 {
    // 0001-01-01T00:00:00Z
    -62_135_596_800
}

pub(crate) fn serialize_opt<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}
