//! Memoized schedule parsing.
//!
//! Parsing is a pure function of the raw text, so parsed schedules can be
//! shared for as long as the text is unchanged. The cache is an explicit
//! object owned by the caller (usually through
//! [`AvailabilityEngine`](crate::AvailabilityEngine)); there is no
//! process-wide state.

use std::fmt;
use std::sync::Arc;

use quick_cache::sync::Cache;
use tracing::trace;

use crate::parser::parse_schedule;
use crate::schedule::WeeklySchedule;

/// Default number of distinct hours texts kept.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Bounded, thread-safe map from raw hours text to its parsed schedule.
pub struct ScheduleCache {
    inner: Cache<String, Arc<WeeklySchedule>>,
    capacity: usize,
}

impl ScheduleCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Cache::new(capacity),
            capacity,
        }
    }

    /// The parsed schedule for `text`, parsing it on first use.
    pub fn get_or_parse(&self, text: &str) -> Arc<WeeklySchedule> {
        if let Some(schedule) = self.inner.get(text) {
            trace!(len = text.len(), "schedule cache hit");
            return schedule;
        }

        trace!(len = text.len(), "schedule cache miss");
        let schedule = Arc::new(parse_schedule(text));
        self.inner.insert(text.to_owned(), Arc::clone(&schedule));
        schedule
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for ScheduleCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_same_text_returns_shared_schedule() {
        let cache = ScheduleCache::default();
        let first = cache.get_or_parse("Mon-Fri 9am-5pm");
        let second = cache.get_or_parse("Mon-Fri 9am-5pm");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_text_is_a_new_entry() {
        let cache = ScheduleCache::default();
        let before = cache.get_or_parse("Mon 9am-5pm");
        let after = cache.get_or_parse("Mon 10am-5pm");
        assert_ne!(before, after);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cached_matches_direct_parse() {
        let cache = ScheduleCache::default();
        let text = "Sun-Thu 11am-10pm\nFri 11am-AS\nSat AS-midnight";
        assert_eq!(*cache.get_or_parse(text), parse_schedule(text));
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ScheduleCache::new(8);
        cache.get_or_parse("Mon 9am-5pm");
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 8);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = ScheduleCache::default();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let schedule = cache.get_or_parse("Tue 8am-4pm");
                    assert!(schedule.get(Weekday::Tue).is_some());
                });
            }
        });
        assert_eq!(cache.len(), 1);
    }
}
