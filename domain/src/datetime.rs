//! Timestamp normalization and the two timestamp formats used on the wire.
//!
//! Clients send times in whatever shape their capture code produced. Parsing
//! never fails: unrecognized input falls back to the current local time, and
//! the returned [`TimeSource`] records which path was taken.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use log::*;

/// `MM/DD/YYYY, hh:mm:ss AM/PM`, for meeting start, segment and join times.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// `YYYY-MM-DD HH:MM:SS`, for record create/update times.
pub const RECORD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a [`NormalizedTime`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The input matched one of the accepted formats
    Parsed,
    /// No input was given; the current time was used
    Absent,
    /// Input was given but not understood; the current time was used
    Defaulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedTime {
    pub instant: NaiveDateTime,
    pub source: TimeSource,
}

/// Parses `raw` as [`DISPLAY_FORMAT`], then [`RECORD_FORMAT`], else returns now.
pub fn normalize(raw: Option<&str>) -> NormalizedTime {
    normalize_or(raw, now())
}

/// Normalizes the client-supplied `field`, logging when the current time
/// had to stand in for it.
pub fn normalize_field(field: &str, raw: Option<&str>) -> NaiveDateTime {
    let normalized = normalize(raw);
    match normalized.source {
        TimeSource::Parsed => {}
        TimeSource::Absent => debug!("No {field} given, using current time"),
        TimeSource::Defaulted => {
            warn!("Unrecognized {field} {raw:?}, using current time instead")
        }
    }

    normalized.instant
}

fn normalize_or(raw: Option<&str>, fallback: NaiveDateTime) -> NormalizedTime {
    let Some(raw) = raw else {
        return NormalizedTime {
            instant: fallback,
            source: TimeSource::Absent,
        };
    };

    let trimmed = raw.trim();
    for format in [DISPLAY_FORMAT, RECORD_FORMAT] {
        if let Ok(instant) = NaiveDateTime::parse_from_str(trimmed, format) {
            return NormalizedTime {
                instant,
                source: TimeSource::Parsed,
            };
        }
    }

    NormalizedTime {
        instant: fallback,
        source: TimeSource::Defaulted,
    }
}

/// Current wall-clock time in the server's local zone.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Current calendar date in the server's local zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_display(instant: &NaiveDateTime) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

/// Formats a record timestamp in UTC.
pub fn format_record(instant: &DateTime<FixedOffset>) -> String {
    instant.with_timezone(&Utc).format(RECORD_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn parses_display_format() {
        let normalized = normalize_or(Some("03/01/2024, 01:05:30 PM"), fallback());

        assert_eq!(normalized.source, TimeSource::Parsed);
        assert_eq!(
            normalized.instant,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(13, 5, 30)
                .unwrap()
        );
    }

    #[test]
    fn parses_record_format() {
        let normalized = normalize_or(Some("2024-03-01 09:15:00"), fallback());

        assert_eq!(normalized.source, TimeSource::Parsed);
        assert_eq!(
            normalized.instant,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
        );
    }

    #[test]
    fn twelve_am_is_midnight() {
        let normalized = normalize_or(Some("03/01/2024, 12:00:00 AM"), fallback());

        assert_eq!(normalized.instant.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn missing_input_is_absent() {
        let normalized = normalize_or(None, fallback());

        assert_eq!(normalized.source, TimeSource::Absent);
        assert_eq!(normalized.instant, fallback());
    }

    #[test]
    fn unparseable_input_is_defaulted() {
        for raw in ["10:05:30", "", "yesterday", "2024-03-01T09:15:00Z"] {
            let normalized = normalize_or(Some(raw), fallback());

            assert_eq!(normalized.source, TimeSource::Defaulted, "input {raw:?}");
            assert_eq!(normalized.instant, fallback());
        }
    }

    #[test]
    fn normalize_field_returns_the_parsed_instant_or_now() {
        let parsed = normalize_field("join time", Some("03/01/2024, 09:00:00 AM"));
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );

        let before = now();
        let defaulted = normalize_field("join time", Some("soon"));
        assert!(defaulted >= before && defaulted <= now());
    }

    #[test]
    fn display_format_round_trips_through_normalize() {
        let instant = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();

        let formatted = format_display(&instant);

        assert_eq!(formatted, "12/31/2024, 11:59:59 PM");
        assert_eq!(normalize_or(Some(&formatted), fallback()).instant, instant);
    }

    #[test]
    fn record_format_is_rendered_in_utc() {
        let instant = DateTime::parse_from_rfc3339("2024-03-01T10:00:00+02:00").unwrap();

        assert_eq!(format_record(&instant), "2024-03-01 08:00:00");
    }
}
