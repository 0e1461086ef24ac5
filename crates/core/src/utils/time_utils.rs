use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::constants::DAY_FORMAT;

/// Parses the date strings stored on records into an instant.
///
/// Records carry either a plain day (`2024-01-31`, read as midnight UTC) or a
/// full RFC 3339 timestamp. Returns `None` for anything else; callers sort
/// those before every parseable date.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(value, DAY_FORMAT) {
        return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Formats an instant the way records store creation/update timestamps.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a calendar day as `YYYY-MM-DD`.
pub fn day_string(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Returns true if `value` is a `YYYY-MM-DD` day.
pub fn is_valid_day(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DAY_FORMAT).is_ok()
}

/// Returns true if `value` is a 24h `HH:MM` clock time.
pub fn is_valid_clock_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_formats() {
        let day = parse_instant("2024-03-05").unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());

        let ts = parse_instant("2024-03-05T10:30:00.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap());

        let offset = parse_instant("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap());

        assert!(parse_instant("next tuesday").is_none());
        assert!(parse_instant("").is_none());
    }

    #[test]
    fn test_day_and_time_validation() {
        assert!(is_valid_day("2024-02-29"));
        assert!(!is_valid_day("2023-02-29"));
        assert!(!is_valid_day("05/03/2024"));
        assert!(is_valid_clock_time("09:15"));
        assert!(!is_valid_clock_time("25:00"));
        assert!(!is_valid_clock_time("9am"));
    }

    #[test]
    fn test_iso_timestamp_roundtrip() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let text = iso_timestamp(now);
        assert_eq!(text, "2024-01-02T03:04:05.000Z");
        assert_eq!(parse_instant(&text), Some(now));
    }

    #[test]
    fn test_get_days_between() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days = get_days_between(start, end);
        assert_eq!(days.len(), 4);
        assert!(get_days_between(end, start).is_empty());
    }
}
