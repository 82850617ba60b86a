//! Conversion between stamps and UTC datestamps.
//!
//! Stamps are microseconds since the Unix epoch. Datestamps use the
//! second-granularity UTC form `YYYY-MM-DDThh:mm:ssZ`.

use chrono::{DateTime, NaiveDateTime};

/// Number of stamp units per second.
pub const DATESTAMP_FACTOR: i64 = 1_000_000;

const DATESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Renders a stamp as a datestamp.
///
/// With `precise`, the sub-second part is appended as `.<micros>` (not zero
/// padded). Returns `None` for stamps outside the range chrono can represent.
pub fn stamp_to_datestamp(stamp: i64, precise: bool) -> Option<String> {
    let seconds = stamp.div_euclid(DATESTAMP_FACTOR);
    let micros = stamp.rem_euclid(DATESTAMP_FACTOR);
    let time = DateTime::from_timestamp(seconds, 0)?;
    let mut rendered = time.format("%Y-%m-%dT%H:%M:%S").to_string();
    if precise {
        rendered.push_str(&format!(".{micros}"));
    }
    rendered.push('Z');
    Some(rendered)
}

/// Parses a datestamp into the stamp of its first microsecond.
///
/// Returns `None` when the text is not a valid datestamp or when the instant
/// does not fit a stamp.
pub fn datestamp_to_stamp(datestamp: &str) -> Option<i64> {
    let time = NaiveDateTime::parse_from_str(datestamp, DATESTAMP_FORMAT).ok()?;
    time.and_utc().timestamp().checked_mul(DATESTAMP_FACTOR)
}
