//! # hours-engine
//!
//! Operating-hours availability for venues.
//!
//! Answers "is this place open right now?" from free-text hours written by
//! staff, for venues spread across timezones, including hours that end (or
//! start) "after Shabbat", one hour after the local sunset on that date.
//!
//! Everything is synchronous and pure. Bad input never panics or errors at
//! the top level: it degrades to [`AvailabilityVerdict::Unknown`] or to a
//! schedule with fewer days.
//!
//! ## Modules
//!
//! - [`parser`] — free-text hours → [`WeeklySchedule`]
//! - [`schedule`] — weekly schedule data model (day specs, time values)
//! - [`clock`] — venue-local civil date and minute-of-day for an instant
//! - [`solar`] — sunset computation and the "after Shabbat" time
//! - [`availability`] — open/closed/unknown verdicts and the caching engine
//! - [`cache`] — memoized schedule parsing
//! - [`error`] — Error types

pub mod availability;
pub mod cache;
pub mod clock;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod solar;

pub use availability::{
    evaluate_schedule, is_open_at, is_open_now, AvailabilityEngine, AvailabilityVerdict,
    EngineOptions, VenueHours,
};
pub use cache::ScheduleCache;
pub use clock::{clock_at, day_of_week, now_in_timezone, LocalClock};
pub use error::HoursError;
pub use parser::parse_schedule;
pub use schedule::{DaySpec, TimeValue, WeeklySchedule};
pub use solar::{
    resolve_after_shabbat, resolve_dynamic_marker, sunset_utc, Coordinates, ResolvedMarker,
};
