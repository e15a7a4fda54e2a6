//! Day and week bucketing on local wall-clock time
//!
//! Completion timestamps are local `NaiveDateTime`s, so truncating to a day
//! is simply taking the date. Streak gap detection works on `NaiveDate`
//! values only; raw timestamps never enter a day difference.

use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use streakline_common::Clock;

/// Truncate a local timestamp to its calendar day.
pub fn start_of_day(t: NaiveDateTime) -> NaiveDate {
    t.date()
}

/// Monday on or before `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - chrono::Days::new(u64::from(day.weekday().num_days_from_monday()))
}

/// Slot of `day` in a Monday-first week (Monday = 0, Sunday = 6).
pub fn weekday_index(day: NaiveDate) -> usize {
    day.weekday().num_days_from_monday() as usize
}

/// Whole days from `earlier` to `later`. Negative if `later` precedes
/// `earlier`.
pub fn day_difference(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Real time left until the clock's next local midnight.
///
/// Exactly at midnight this is a full day, so a sweep armed at 00:00 runs
/// at the following midnight rather than immediately. Across a daylight
/// saving change the day is 23 or 25 hours long.
pub fn delay_until_next_midnight(clock: &dyn Clock) -> Duration {
    (clock.next_local_midnight() - clock.now()).to_std().unwrap_or_default()
}
