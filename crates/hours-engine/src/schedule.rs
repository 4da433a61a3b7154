//! Structured weekly schedule produced by the parser.
//!
//! Days are keyed by their Sunday-based index (Sunday = 0 .. Saturday = 6),
//! which is the canonical weekday representation used across the engine.
//! `chrono::Weekday` is the public type; [`day_index`] and
//! [`weekday_from_index`] convert between the two.

use std::fmt;

use chrono::Weekday;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The seven days in index order, Sunday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Sunday-based index of a weekday (Sunday = 0, Saturday = 6).
pub fn day_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Inverse of [`day_index`]. Returns `None` for indices above 6.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEK.get(index as usize).copied()
}

/// Lowercase English name of a weekday, used as the serialized map key.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

// ── TimeValue ───────────────────────────────────────────────────────────────

/// One side of an opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeValue {
    /// Minutes since local midnight (0..1440).
    Minutes(u16),
    /// One hour after local sunset ("after Shabbat"); resolved per date and location.
    AfterShabbat,
}

impl TimeValue {
    /// Build a fixed clock time. Returns `None` outside 00:00..=23:59.
    pub fn at(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeValue::Minutes(hour * 60 + minute))
        } else {
            None
        }
    }

    /// The fixed minute value, if this is not the dynamic marker.
    pub fn minutes(self) -> Option<u16> {
        match self {
            TimeValue::Minutes(m) => Some(m),
            TimeValue::AfterShabbat => None,
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, TimeValue::AfterShabbat)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Minutes(m) => write!(f, "{:02}:{:02}", m / 60, m % 60),
            TimeValue::AfterShabbat => f.write_str("after Shabbat"),
        }
    }
}

// ── DaySpec ─────────────────────────────────────────────────────────────────

/// What the schedule says about one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DaySpec {
    /// Explicitly closed all day.
    Closed,
    /// Open from `open` until `close`. `close < open` denotes an overnight window.
    Hours { open: TimeValue, close: TimeValue },
}

impl DaySpec {
    /// Whether either end of the window is the dynamic "after Shabbat" marker.
    pub fn references_marker(&self) -> bool {
        match self {
            DaySpec::Closed => false,
            DaySpec::Hours { open, close } => open.is_dynamic() || close.is_dynamic(),
        }
    }
}

impl fmt::Display for DaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySpec::Closed => f.write_str("closed"),
            DaySpec::Hours { open, close } => write!(f, "{open}-{close}"),
        }
    }
}

// ── WeeklySchedule ──────────────────────────────────────────────────────────

/// Parsed weekly hours: one optional [`DaySpec`] per weekday.
///
/// A day that was never mentioned in the source text is `None`, which is
/// distinct from an explicit [`DaySpec::Closed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Option<DaySpec>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `weekday`, or `None` if the day was never mentioned.
    pub fn get(&self, weekday: Weekday) -> Option<&DaySpec> {
        self.days[day_index(weekday) as usize].as_ref()
    }

    /// Store `spec` for `weekday`, replacing any earlier entry.
    pub fn set(&mut self, weekday: Weekday, spec: DaySpec) {
        self.days[day_index(weekday) as usize] = Some(spec);
    }

    /// Number of weekdays with an entry.
    pub fn len(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    /// Present entries in Sunday..Saturday order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySpec)> + '_ {
        WEEK.iter()
            .zip(self.days.iter())
            .filter_map(|(weekday, spec)| spec.as_ref().map(|s| (*weekday, s)))
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (weekday, spec) in self.iter() {
            map.serialize_entry(weekday_name(weekday), spec)?;
        }
        map.end()
    }
}
