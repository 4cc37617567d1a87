//! Utility functions and helpers.

pub mod http;

use chrono::{DateTime, FixedOffset, Utc};

// The source page publishes on Japan time; stamps follow it.
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn to_jst(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    now.with_timezone(&FixedOffset::east_opt(JST_OFFSET_SECS).expect("JST offset is valid"))
}

/// Capture timestamp prepended to appended rows.
pub fn capture_stamp(now: DateTime<Utc>) -> String {
    to_jst(now).format("%Y/%m/%d %H:%M").to_string()
}

/// Timestamp embedded in generated file names.
pub fn file_stamp(now: DateTime<Utc>) -> String {
    to_jst(now).format("%Y%m%d_%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_capture_stamp_is_jst() {
        // 23:30 UTC is 08:30 the next day in JST
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 23, 30, 0).unwrap();
        assert_eq!(capture_stamp(now), "2026/08/07 08:30");
    }

    #[test]
    fn test_file_stamp_is_jst() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 0, 5, 0).unwrap();
        assert_eq!(file_stamp(now), "20260807_0905");
    }
}
