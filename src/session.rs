//! Session identifiers.
//!
//! A session groups every pair result of one batch. Its id is the ISO-8601
//! timestamp at which the batch was checked, rendered in a fixed UTC offset so
//! ids sort chronologically as plain strings.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// UTC+08:00. The zone has no daylight saving, so a fixed offset is exact.
pub const DEFAULT_SESSION_OFFSET_SECS: i32 = 8 * 3600;

const SESSION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// The default session offset.
pub fn default_session_offset() -> FixedOffset {
    // 8h is well inside the +-24h range FixedOffset accepts.
    FixedOffset::east_opt(DEFAULT_SESSION_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Session id for "now" in `offset`.
pub fn session_id_now(offset: &FixedOffset) -> String {
    session_id_at(Utc::now(), offset)
}

/// Session id for a given instant, e.g. `2024-05-01T10:00:00.000000+08:00`.
pub fn session_id_at(instant: DateTime<Utc>, offset: &FixedOffset) -> String {
    offset
        .from_utc_datetime(&instant.naive_utc())
        .format(SESSION_FORMAT)
        .to_string()
}
