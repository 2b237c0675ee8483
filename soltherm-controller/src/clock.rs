//! Timestamp rendering for the diagnostics trace.
//!
//! Logged telemetry always carries UTC timestamps; the configured UTC
//! offset is applied only when rendering a time for a human reader.

use time::{Duration, OffsetDateTime};

/// Render a Unix timestamp in the device's local timezone as
/// `H:MM:SS M/D/YYYY`.
///
/// Falls back to the raw seconds count if the timestamp is outside the
/// representable range.
pub fn local_timestamp(unix_seconds: i64, gmt_offset_hours: i8) -> String {
    match OffsetDateTime::from_unix_timestamp(unix_seconds) {
        Ok(utc) => {
            let local = utc + Duration::hours(i64::from(gmt_offset_hours));
            format!(
                "{}:{:02}:{:02} {}/{}/{}",
                local.hour(),
                local.minute(),
                local.second(),
                u8::from(local.month()),
                local.day(),
                local.year()
            )
        }
        Err(_) => unix_seconds.to_string(),
    }
}
