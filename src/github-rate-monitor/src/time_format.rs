//! Formatting helpers for rate limit reset timestamps.

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Display format for reset instants.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Timestamps chrono cannot represent are rendered as the raw number.
#[must_use]
pub fn format_timestamp(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Returns the whole minutes left until `ts`, or 0 once it has passed.
#[must_use]
pub fn minutes_until_reset(ts: u64) -> u64 {
    minutes_until_reset_at(ts, unix_now())
}

/// Same as [`minutes_until_reset`], measured from an explicit `now`.
#[must_use]
pub fn minutes_until_reset_at(ts: u64, now: u64) -> u64 {
    ts.saturating_sub(now) / 60
}

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
