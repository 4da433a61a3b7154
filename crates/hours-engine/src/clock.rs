//! Civil date and wall-clock time as observed in a venue's timezone.
//!
//! Every function here is a pure function of an instant and an IANA timezone
//! name, so a venue in one timezone and a user in another agree on what day
//! it is at the venue. With no timezone, UTC is assumed.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{HoursError, Result};
use crate::schedule::day_index;

/// The venue-local civil date and minutes elapsed since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalClock {
    pub date: NaiveDate,
    pub minutes_from_midnight: u16,
}

impl LocalClock {
    /// Weekday of the local civil date.
    pub fn weekday(&self) -> Weekday {
        day_of_week(self.date)
    }
}

/// Parse an optional IANA timezone name. Absent or blank means UTC.
///
/// # Errors
///
/// Returns [`HoursError::InvalidTimezone`] if the name is not a known IANA zone.
pub fn resolve_timezone(timezone: Option<&str>) -> Result<Tz> {
    match timezone.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Tz::UTC),
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| HoursError::InvalidTimezone(format!("'{name}'"))),
    }
}

/// Local clock at `instant` in an already-resolved timezone.
pub fn local_clock(instant: DateTime<Utc>, tz: Tz) -> LocalClock {
    let local = instant.with_timezone(&tz);
    LocalClock {
        date: local.date_naive(),
        minutes_from_midnight: (local.hour() * 60 + local.minute()) as u16,
    }
}

/// Local clock at `instant` in the named timezone (UTC if `None`).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use hours_engine::clock::clock_at;
///
/// // 02:00 UTC on Tuesday is still Monday evening in New York.
/// let instant = Utc.with_ymd_and_hms(2026, 10, 20, 2, 0, 0).unwrap();
/// let clock = clock_at(instant, Some("America/New_York")).unwrap();
/// assert_eq!(clock.weekday(), Weekday::Mon);
/// assert_eq!(clock.minutes_from_midnight, 22 * 60);
/// ```
pub fn clock_at(instant: DateTime<Utc>, timezone: Option<&str>) -> Result<LocalClock> {
    let tz = resolve_timezone(timezone)?;
    Ok(local_clock(instant, tz))
}

/// Local clock right now in the named timezone (UTC if `None`).
pub fn now_in_timezone(timezone: Option<&str>) -> Result<LocalClock> {
    clock_at(Utc::now(), timezone)
}

/// Weekday of a civil date. The date must already be the one observed in the
/// venue's timezone (see [`clock_at`]).
pub fn day_of_week(date: NaiveDate) -> Weekday {
    date.weekday()
}

/// Sunday-based day index (Sunday = 0) of a civil date.
pub fn day_index_of(date: NaiveDate) -> u8 {
    day_index(date.weekday())
}

/// Parse a `YYYY-MM-DD` civil date.
pub fn parse_civil_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| HoursError::InvalidDate(format!("'{}': {}", s.trim(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_no_timezone_is_utc() {
        let clock = clock_at(instant(2026, 10, 20, 2, 15), None).unwrap();
        assert_eq!(clock.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(clock.minutes_from_midnight, 135);
        assert_eq!(clock.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_blank_timezone_is_utc() {
        let a = clock_at(instant(2026, 10, 20, 2, 15), Some("  ")).unwrap();
        let b = clock_at(instant(2026, 10, 20, 2, 15), Some("UTC")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_instant_different_local_days() {
        let at = instant(2026, 10, 20, 2, 0);
        let new_york = clock_at(at, Some("America/New_York")).unwrap();
        let tokyo = clock_at(at, Some("Asia/Tokyo")).unwrap();

        assert_eq!(new_york.weekday(), Weekday::Mon);
        assert_eq!(new_york.minutes_from_midnight, 22 * 60);
        assert_eq!(tokyo.weekday(), Weekday::Tue);
        assert_eq!(tokyo.minutes_from_midnight, 11 * 60);
    }

    #[test]
    fn test_dst_spring_forward_wall_clock() {
        // March 8, 2026: New York jumps from 02:00 EST to 03:00 EDT at 07:00 UTC.
        let before = clock_at(instant(2026, 3, 8, 6, 30), Some("America/New_York")).unwrap();
        let after = clock_at(instant(2026, 3, 8, 7, 30), Some("America/New_York")).unwrap();
        assert_eq!(before.minutes_from_midnight, 90);
        assert_eq!(after.minutes_from_midnight, 210);
    }

    #[test]
    fn test_invalid_timezone_returns_error() {
        let err = clock_at(instant(2026, 10, 20, 2, 0), Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_day_index_of_is_sunday_based() {
        let sunday = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(day_index_of(sunday), 0);
        assert_eq!(day_index_of(monday), 1);
        assert_eq!(day_of_week(monday), Weekday::Mon);
    }

    #[test]
    fn test_parse_civil_date() {
        assert_eq!(
            parse_civil_date(" 2026-06-19 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 19).unwrap()
        );
        let err = parse_civil_date("19/06/2026").unwrap_err();
        assert!(err.to_string().contains("Invalid date"), "got: {err}");
    }

    #[test]
    fn test_now_in_timezone_is_within_day() {
        let clock = now_in_timezone(Some("Asia/Jerusalem")).unwrap();
        assert!(clock.minutes_from_midnight < 24 * 60);
    }
}
