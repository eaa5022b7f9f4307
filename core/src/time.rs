//! Time related utils.

use chrono::{NaiveDateTime, Utc};

use crate::Result;

/// DateTime in UTC, the only flavor used across ecsctl.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a datetime as the ISO 8601 timestamp the compute API expects.
///
/// For example: `2024-01-01T00:00:00Z`. Sub-second precision is dropped.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse an ISO 8601 timestamp like `2024-01-01T00:00:00Z` as UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_iso8601() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_iso8601(t), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_iso8601() {
        let t = parse_iso8601("2024-06-15T12:30:45Z").unwrap();
        assert_eq!(format_iso8601(t), "2024-06-15T12:30:45Z");
    }

    #[test]
    fn test_parse_iso8601_rejects_garbage() {
        assert!(parse_iso8601("yesterday").is_err());
    }
}
