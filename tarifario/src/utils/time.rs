//! Date and time parsing
//!
//! Every stay value is a local calendar date/time; there is no timezone.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an optional configuration date; empty or malformed means unset
pub fn parse_optional_date(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!("Ignoring malformed date '{}': {}", date, e);
            None
        }
    }
}

/// Parse a date-time (`YYYY-MM-DDTHH:MM[:SS]` or with a space)
///
/// A bare date means midnight.
pub fn parse_datetime(value: &str) -> AppResult<NaiveDateTime> {
    let trimmed = value.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    parse_date(trimmed)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| AppError::validation(format!("Invalid date-time format: {}", value)))
}

/// Parse a time of day (HH:MM)
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-12-20").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()
        );
        let err = parse_date("20/12/2025").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_parse_optional_date() {
        assert!(parse_optional_date("").is_none());
        assert!(parse_optional_date("not-a-date").is_none());
        assert!(parse_optional_date("2026-03-15").is_some());
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 20)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2025-12-20T14:00").unwrap(), expected);
        assert_eq!(parse_datetime("2025-12-20 14:00:00").unwrap(), expected);
        assert_eq!(
            parse_datetime("2025-12-20").unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_datetime("amanhã").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("19:30").unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }
}
