//! Timestamp parsing for dataset rows and manual date-time entry.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parses a raw timestamp into a UTC instant, or `None` if the input is
/// unparseable or names an invalid calendar date.
///
/// The primary format is `DD/MM/YYYY H:MM` (day/month/year, 24-hour, minutes
/// optional, defaulting to 00). It carries no zone designator; values are
/// interpreted as UTC wall-clock. This is a fixed assumption of the dataset,
/// not something inferred per row. Input not matching the primary format
/// falls back to ISO-8601.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_day_month_year(trimmed).or_else(|| parse_iso(trimmed))
}

fn parse_day_month_year(s: &str) -> Option<DateTime<Utc>> {
    let mut parts = s.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let mut dmy = date_part.split('/');
    let day: u32 = dmy.next()?.parse().ok()?;
    let month: u32 = dmy.next()?.parse().ok()?;
    let year: i32 = dmy.next()?.parse().ok()?;
    if dmy.next().is_some() {
        return None;
    }

    let (hour, minute) = match time_part {
        Some(t) => {
            let mut hm = t.split(':');
            let hour: u32 = hm.next()?.parse().ok()?;
            let minute: u32 = match hm.next() {
                Some(m) => m.parse().ok()?,
                None => 0,
            };
            if hm.next().is_some() {
                return None;
            }
            (hour, minute)
        }
        None => (0, 0),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time).and_utc())
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Zone-less ISO variants are read as UTC, same as the primary format.
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_primary_format_round_trips() {
        let dt = parse_instant("20/02/2023 2:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 2, 20));
        assert_eq!((dt.hour(), dt.minute()), (2, 0));

        let dt = parse_instant("1/12/2024 23:45").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 12, 1));
        assert_eq!((dt.hour(), dt.minute()), (23, 45));
    }

    #[test]
    fn test_minutes_optional_defaults_to_zero() {
        let dt = parse_instant("20/02/2023 7").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (7, 0));
    }

    #[test]
    fn test_date_only_is_midnight() {
        let dt = parse_instant("20/02/2023").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn test_invalid_calendar_rejected() {
        assert!(parse_instant("20/13/2023 2:00").is_none());
        assert!(parse_instant("32/01/2023 2:00").is_none());
        assert!(parse_instant("29/02/2023 2:00").is_none()); // not a leap year
    }

    #[test]
    fn test_iso_fallback_matches_rfc3339() {
        let from_fallback = parse_instant("2023-02-20T02:00:00Z").unwrap();
        let native = DateTime::parse_from_rfc3339("2023-02-20T02:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(from_fallback, native);
    }

    #[test]
    fn test_iso_without_zone_is_utc() {
        let dt = parse_instant("2023-02-20 14:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
        assert!(parse_instant("2023-02-20").is_some());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("   ").is_none());
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("20-02-2023 2:00").is_none());
        assert!(parse_instant("20/02/2023 2:00 extra").is_none());
    }
}
