//! Sunset computation and the "after Shabbat" dynamic time.
//!
//! "After Shabbat" is a fixed offset (one hour by default) after the local
//! astronomical sunset on a given date at a given point. The sunset instant
//! is absolute; only the final conversion to minute-of-day depends on the
//! venue timezone. Because a late sunset plus an hour can cross local
//! midnight, the resolved civil date is returned alongside the minutes.
//!
//! Sun events come from the [`sunrise`] crate: the standard sunrise equation
//! (solar transit plus hour angle at -0.833° altitude), accurate to about a
//! minute at non-polar latitudes.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sunrise::{SolarDay, SolarEvent};

use crate::clock::{local_clock, resolve_timezone};
use crate::error::{HoursError, Result};

/// Default minutes after sunset at which "after Shabbat" begins.
pub const AFTER_SHABBAT_OFFSET_MINUTES: i64 = 60;

// ── Coordinates ─────────────────────────────────────────────────────────────

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidCoordinates`] for non-finite values,
    /// latitude outside ±90 or longitude outside ±180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(HoursError::InvalidCoordinates(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(HoursError::InvalidCoordinates(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build from optional venue fields. `Ok(None)` when either part is missing.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Self>> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self::new(lat, lng).map(Some),
            _ => Ok(None),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

// ── Sunset ──────────────────────────────────────────────────────────────────

/// Sunset instant for the solar day of `date` at `coords`.
///
/// # Errors
///
/// Returns [`HoursError::NoSunset`] during polar day or polar night.
pub fn sunset_utc(date: NaiveDate, coords: Coordinates) -> Result<DateTime<Utc>> {
    let site = sunrise::Coordinates::new(coords.latitude, coords.longitude).ok_or_else(|| {
        HoursError::InvalidCoordinates(format!("({}, {})", coords.latitude, coords.longitude))
    })?;
    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| HoursError::InvalidDate(format!("'{date}'")))?
        .and_utc();

    // A missing event is `None`, or on older releases an instant nowhere
    // near the requested day.
    let sunset: Option<DateTime<Utc>> =
        SolarDay::new(site, date).event_time(SolarEvent::Sunset).into();

    match sunset {
        Some(sunset) if (sunset - noon).num_hours().abs() <= 24 => Ok(sunset),
        _ => Err(HoursError::NoSunset(format!(
            "sun does not set on {date} at ({}, {})",
            coords.latitude, coords.longitude
        ))),
    }
}

// ── After Shabbat ───────────────────────────────────────────────────────────

/// The resolved "after Shabbat" time for one date and place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMarker {
    /// Minutes since local midnight on [`date`](Self::date).
    pub minutes_from_midnight: u16,
    /// Civil date of the instant in the venue timezone. May be the day after
    /// the requested date when sunset plus the offset crosses midnight.
    pub date: NaiveDate,
    /// The absolute instant.
    pub instant: DateTime<Utc>,
    /// The sunset the offset was applied to.
    pub sunset: DateTime<Utc>,
}

/// Resolve "after Shabbat" (sunset + `offset`) on `date` at `coords`,
/// expressed in `timezone` (UTC if `None`).
///
/// # Errors
///
/// Returns [`HoursError::InvalidTimezone`] for an unknown zone name,
/// [`HoursError::NoSunset`] when the sun does not set that day, or
/// [`HoursError::InvalidOffset`] when sunset plus `offset` is out of range.
pub fn resolve_after_shabbat(
    date: NaiveDate,
    coords: Coordinates,
    timezone: Option<&str>,
    offset: Duration,
) -> Result<ResolvedMarker> {
    let tz = resolve_timezone(timezone)?;
    let sunset = sunset_utc(date, coords)?;
    let instant = sunset
        .checked_add_signed(offset)
        .ok_or_else(|| HoursError::InvalidOffset(format!("{offset} after sunset on {date}")))?;
    let clock = local_clock(instant, tz);

    Ok(ResolvedMarker {
        minutes_from_midnight: clock.minutes_from_midnight,
        date: clock.date,
        instant,
        sunset,
    })
}

/// [`resolve_after_shabbat`] with raw latitude/longitude and the default
/// one-hour offset.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hours_engine::solar::resolve_dynamic_marker;
///
/// // Friday, June 19 2026 in New York: sunset ~20:31 EDT, so ~21:31.
/// let date = NaiveDate::from_ymd_opt(2026, 6, 19).unwrap();
/// let resolved =
///     resolve_dynamic_marker(date, 40.7128, -74.0060, Some("America/New_York")).unwrap();
/// assert_eq!(resolved.date, date);
/// assert_eq!(resolved.minutes_from_midnight / 60, 21);
/// ```
pub fn resolve_dynamic_marker(
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    timezone: Option<&str>,
) -> Result<ResolvedMarker> {
    let coords = Coordinates::new(latitude, longitude)?;
    resolve_after_shabbat(
        date,
        coords,
        timezone,
        Duration::minutes(AFTER_SHABBAT_OFFSET_MINUTES),
    )
}
