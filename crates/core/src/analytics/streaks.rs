//! Current and longest completion streaks
//!
//! A streak is a run of consecutive calendar days with at least one
//! completion. Several completions on the same day count as one day: a
//! zero-day gap neither extends nor breaks a streak.

use chrono::{NaiveDate, NaiveDateTime};
use streakline_domain::Habit;

use super::bucketing::{day_difference, start_of_day};

/// Streak computations over a borrowed habit list
#[derive(Debug, Clone, Copy)]
pub struct StreakCalculator<'a> {
    habits: &'a [Habit],
}

impl<'a> StreakCalculator<'a> {
    pub fn new(habits: &'a [Habit]) -> Self {
        Self { habits }
    }

    /// Consecutive completion days ending on `today`.
    ///
    /// Zero unless something was completed today, however long the run
    /// before it.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let mut completions = self.completions();
        completions.sort_unstable_by(|a, b| b.cmp(a));

        let mut days = completions.into_iter().map(start_of_day);
        let Some(mut previous) = days.next() else {
            return 0;
        };
        if previous != today {
            return 0;
        }

        let mut streak = 1;
        for current in days {
            match day_difference(previous, current) {
                0 => continue,
                1 => streak += 1,
                _ => break,
            }
            previous = current;
        }
        streak
    }

    /// Longest run of consecutive completion days anywhere in the history.
    pub fn longest_streak(&self) -> u32 {
        let mut completions = self.completions();
        completions.sort_unstable();

        let mut days = completions.into_iter().map(start_of_day);
        let Some(mut previous) = days.next() else {
            return 0;
        };

        let mut running = 1;
        let mut longest = 1;
        for current in days {
            match day_difference(current, previous) {
                0 => {}
                1 => running += 1,
                _ => running = 1,
            }
            longest = longest.max(running);
            previous = current;
        }
        longest
    }

    fn completions(&self) -> Vec<NaiveDateTime> {
        self.habits.iter().filter_map(Habit::completion).collect()
    }
}
