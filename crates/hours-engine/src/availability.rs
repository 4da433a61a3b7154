//! Open/closed verdicts for a venue at an instant.
//!
//! Composes the parser, the local clock and the solar resolver:
//!
//! 1. blank hours text → [`Unknown`](AvailabilityVerdict::Unknown);
//! 2. find the venue-local civil date and minute-of-day;
//! 3. look up that weekday in the parsed schedule (absent or closed →
//!    [`Closed`](AvailabilityVerdict::Closed));
//! 4. substitute "after Shabbat" with the resolved time for today's date,
//!    which needs coordinates (missing → `Unknown`);
//! 5. compare, treating `close < open` as a window that crosses midnight.
//!
//! Nothing here returns an error or panics on bad input. Anything that cannot
//! be resolved becomes `Unknown`.
//!
//! A window belongs only to the day it is keyed to: `Sat 6pm-1am` covers
//! Saturday 18:00-24:00 and Saturday 00:00-01:00, not Sunday 00:00-01:00.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{ScheduleCache, DEFAULT_CAPACITY};
use crate::clock::clock_at;
use crate::error::{HoursError, Result};
use crate::parser::parse_schedule;
use crate::schedule::{DaySpec, TimeValue, WeeklySchedule};
use crate::solar::{resolve_after_shabbat, Coordinates, AFTER_SHABBAT_OFFSET_MINUTES};

// ── Verdict ─────────────────────────────────────────────────────────────────

/// Tri-state availability. `Unknown` means "cannot tell", not "closed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityVerdict {
    Open,
    Closed,
    Unknown,
}

impl fmt::Display for AvailabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AvailabilityVerdict::Open => "open",
            AvailabilityVerdict::Closed => "closed",
            AvailabilityVerdict::Unknown => "unknown",
        })
    }
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Minutes after sunset at which "after Shabbat" begins.
    pub after_shabbat_offset_minutes: i64,
    /// Maximum number of distinct hours texts kept parsed.
    pub cache_capacity: usize,
    /// Timezone assumed for venues without one. `None` means UTC.
    pub default_timezone: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            after_shabbat_offset_minutes: AFTER_SHABBAT_OFFSET_MINUTES,
            cache_capacity: DEFAULT_CAPACITY,
            default_timezone: None,
        }
    }
}

impl EngineOptions {
    /// The configured offset as a duration.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidOffset`] when the minute count does not
    /// fit a [`Duration`].
    pub fn after_shabbat_offset(&self) -> Result<Duration> {
        Duration::try_minutes(self.after_shabbat_offset_minutes).ok_or_else(|| {
            HoursError::InvalidOffset(format!("{} minutes", self.after_shabbat_offset_minutes))
        })
    }
}

// ── Venue record ────────────────────────────────────────────────────────────

/// The venue fields the engine reads. Owned by the surrounding system and
/// passed in by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueHours {
    #[serde(default)]
    pub hours_of_operation: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone_id: Option<String>,
}

impl VenueHours {
    /// Valid coordinates, or `None` when missing or out of range.
    pub fn coordinates(&self) -> Option<Coordinates> {
        coordinates_or_none(self.latitude, self.longitude)
    }
}

fn coordinates_or_none(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    Coordinates::from_parts(latitude, longitude).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring venue coordinates");
        None
    })
}

// ── Free functions ──────────────────────────────────────────────────────────

/// Is the venue open right now?
///
/// `latitude`/`longitude` are only needed when today's hours use "after
/// Shabbat". `timezone` is an IANA name; `None` means UTC.
pub fn is_open_now(
    hours_text: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<&str>,
) -> AvailabilityVerdict {
    is_open_at(
        hours_text,
        coordinates_or_none(latitude, longitude),
        timezone,
        Utc::now(),
    )
}

/// Is the venue open at `at`?
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use hours_engine::{is_open_at, AvailabilityVerdict};
///
/// // Monday 10:00 in New York.
/// let at = Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
/// let verdict = is_open_at("Mon-Fri 9am-5pm", None, Some("America/New_York"), at);
/// assert_eq!(verdict, AvailabilityVerdict::Open);
/// ```
pub fn is_open_at(
    hours_text: &str,
    coords: Option<Coordinates>,
    timezone: Option<&str>,
    at: DateTime<Utc>,
) -> AvailabilityVerdict {
    if hours_text.trim().is_empty() {
        return AvailabilityVerdict::Unknown;
    }
    let schedule = parse_schedule(hours_text);
    evaluate_schedule(&schedule, coords, timezone, at, &EngineOptions::default())
}

/// Evaluate an already-parsed schedule at `at`.
///
/// Callers holding a cached [`WeeklySchedule`] use this directly. An empty
/// schedule evaluates to `Closed` (no entry for today); blank-text handling
/// belongs to the caller.
pub fn evaluate_schedule(
    schedule: &WeeklySchedule,
    coords: Option<Coordinates>,
    timezone: Option<&str>,
    at: DateTime<Utc>,
    options: &EngineOptions,
) -> AvailabilityVerdict {
    let timezone = timezone.or(options.default_timezone.as_deref());

    let clock = match clock_at(at, timezone) {
        Ok(clock) => clock,
        Err(e) => {
            warn!(error = %e, "cannot resolve venue clock");
            return AvailabilityVerdict::Unknown;
        }
    };

    let spec = schedule
        .get(clock.weekday())
        .copied()
        .unwrap_or(DaySpec::Closed);
    let DaySpec::Hours { open, close } = spec else {
        return AvailabilityVerdict::Closed;
    };

    let after_shabbat = if spec.references_marker() {
        match resolve_marker(clock.date, coords, timezone, options) {
            Some(minutes) => Some(minutes),
            None => return AvailabilityVerdict::Unknown,
        }
    } else {
        None
    };
    let resolve = |value: TimeValue| value.minutes().or(after_shabbat);
    let (Some(open), Some(close)) = (resolve(open), resolve(close)) else {
        return AvailabilityVerdict::Unknown;
    };

    if window_contains(open, close, clock.minutes_from_midnight) {
        AvailabilityVerdict::Open
    } else {
        AvailabilityVerdict::Closed
    }
}

/// Whether `now` falls inside `[open, close)`, wrapping past midnight when
/// `close < open`.
pub fn window_contains(open: u16, close: u16, now: u16) -> bool {
    if close < open {
        now >= open || now < close
    } else {
        open <= now && now < close
    }
}

/// Minute-of-day of "after Shabbat" on `date`, or `None` when it cannot be
/// resolved (no coordinates, no sunset, unusable offset).
fn resolve_marker(
    date: NaiveDate,
    coords: Option<Coordinates>,
    timezone: Option<&str>,
    options: &EngineOptions,
) -> Option<u16> {
    let Some(coords) = coords else {
        debug!(%date, "after-Shabbat hours need venue coordinates");
        return None;
    };
    let resolved = options
        .after_shabbat_offset()
        .and_then(|offset| resolve_after_shabbat(date, coords, timezone, offset));

    match resolved {
        Ok(resolved) => Some(resolved.minutes_from_midnight),
        Err(e) => {
            warn!(%date, error = %e, "cannot resolve after-Shabbat time");
            None
        }
    }
}

// ── AvailabilityEngine ──────────────────────────────────────────────────────

/// Shared evaluator owning its options and a schedule cache.
///
/// `Send + Sync`; one instance can serve every venue in a listing.
#[derive(Debug, Default)]
pub struct AvailabilityEngine {
    options: EngineOptions,
    cache: ScheduleCache,
}

impl AvailabilityEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            cache: ScheduleCache::new(options.cache_capacity),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn cache(&self) -> &ScheduleCache {
        &self.cache
    }

    /// The (cached) parsed schedule for an hours text.
    pub fn schedule(&self, hours_text: &str) -> Arc<WeeklySchedule> {
        self.cache.get_or_parse(hours_text)
    }

    /// Verdict for `venue` at `at`.
    pub fn verdict_at(&self, venue: &VenueHours, at: DateTime<Utc>) -> AvailabilityVerdict {
        if venue.hours_of_operation.trim().is_empty() {
            return AvailabilityVerdict::Unknown;
        }
        let schedule = self.schedule(&venue.hours_of_operation);
        evaluate_schedule(
            &schedule,
            venue.coordinates(),
            venue.timezone_id.as_deref(),
            at,
            &self.options,
        )
    }

    /// Verdict for `venue` right now.
    pub fn verdict_now(&self, venue: &VenueHours) -> AvailabilityVerdict {
        self.verdict_at(venue, Utc::now())
    }
}
