//! Lenient timestamp parsing for metadata written by older releases.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Compact form used in temporary file names, e.g. `20250131_142501`.
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Accepts RFC3339 strings or the compact `%Y%m%d_%H%M%S` form (local time).
pub fn deserialize_local_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_local_timestamp(&raw).map_err(Error::custom)
}

pub fn parse_local_timestamp(raw: &str) -> Result<DateTime<Local>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, COMPACT_TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("timestamp '{raw}' does not exist in the local timezone"))
}
