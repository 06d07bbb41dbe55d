//! Wall-clock source and identifier allocation.
//!
//! # Responsibility
//! - Abstract "now" so store and resolver behavior is testable.
//! - Allocate wall-clock-derived entity ids that never repeat.
//!
//! # Invariants
//! - Every id issued by one `IdGenerator` is strictly greater than every id
//!   it issued or observed before.

use chrono::{DateTime, NaiveDate, Utc};
use std::cell::Cell;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Advances the clock by `millis` milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        self.now
            .set(self.now.get() + chrono::Duration::milliseconds(millis));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Largest stored id the generator will step past. Anything above is far
/// outside the millisecond range and cannot collide with an issued id.
const MAX_OBSERVED_ID: i64 = i64::MAX / 2;

/// Issues decimal string ids derived from epoch milliseconds.
///
/// Two calls inside the same millisecond (or a clock that stands still)
/// still yield distinct ids because the counter is bumped past the last one.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Cell<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id that already exists so it is never issued again.
    ///
    /// Non-numeric ids and ids above `MAX_OBSERVED_ID` are ignored; they
    /// cannot collide with issued ones.
    pub fn observe(&self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            if value <= MAX_OBSERVED_ID && value > self.last.get() {
                self.last.set(value);
            }
        }
    }

    /// Returns the next raw id value for `now`.
    pub fn next_value(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        let next = if candidate > self.last.get() {
            candidate
        } else {
            self.last.get().saturating_add(1)
        };
        self.last.set(next);
        next
    }

    /// Returns the next id for `now` as a decimal string.
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        self.next_value(now).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, IdGenerator};
    use chrono::{TimeZone, Utc};

    #[test]
    fn ids_are_strictly_increasing_under_a_frozen_clock() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 26, 8, 0, 0).unwrap());
        let ids = IdGenerator::new();
        let first = ids.next_value(clock.now());
        let second = ids.next_value(clock.now());
        assert_eq!(first, clock.now().timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 26, 8, 0, 0).unwrap());
        let ids = IdGenerator::new();
        let future = clock.now().timestamp_millis() + 500;
        ids.observe(&future.to_string());
        ids.observe("not-a-number");
        assert_eq!(ids.next_value(clock.now()), future + 1);
    }

    #[test]
    fn out_of_range_stored_ids_are_ignored() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 26, 8, 0, 0).unwrap());
        let ids = IdGenerator::new();
        ids.observe(&i64::MAX.to_string());
        let first = ids.next_value(clock.now());
        assert_eq!(first, clock.now().timestamp_millis());
        assert_eq!(ids.next_value(clock.now()), first + 1);
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 26, 23, 59, 59).unwrap());
        clock.advance_millis(1_000);
        assert_eq!(clock.today().to_string(), "2024-07-27");
    }
}
