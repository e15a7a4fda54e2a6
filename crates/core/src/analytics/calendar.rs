//! Time-bucketed completion counts for charts and the month calendar
//!
//! Counts are counts: two completions on the same day add two. Only the
//! month grid collapses a day to a single completed flag.

use std::collections::HashSet;

use chrono::{Datelike, Days, Months, NaiveDate};
use streakline_domain::constants::DAYS_PER_WEEK;
use streakline_domain::{CalendarCell, Habit, MonthGrid, MonthlyCounts, WeeklyCounts, YearlyCounts};

use super::bucketing::{start_of_day, start_of_week, weekday_index};

/// Completion aggregation over a borrowed habit list
#[derive(Debug, Clone, Copy)]
pub struct CalendarAggregator<'a> {
    habits: &'a [Habit],
}

impl<'a> CalendarAggregator<'a> {
    pub fn new(habits: &'a [Habit]) -> Self {
        Self { habits }
    }

    /// Completions per weekday (Monday first) within the week containing
    /// `today`.
    pub fn weekly_counts(&self, today: NaiveDate) -> WeeklyCounts {
        let week_start = start_of_week(today);
        let mut counts = WeeklyCounts::default();

        for day in self.completion_days() {
            let offset = (day - week_start).num_days();
            if (0..DAYS_PER_WEEK as i64).contains(&offset) {
                counts[weekday_index(day)] += 1;
            }
        }
        counts
    }

    /// Completions per month (January first) within `today`'s year.
    pub fn monthly_counts(&self, today: NaiveDate) -> MonthlyCounts {
        let mut counts = MonthlyCounts::default();

        for day in self.completion_days().filter(|day| day.year() == today.year()) {
            counts[day.month0() as usize] += 1;
        }
        counts
    }

    /// Completions per year across the whole history.
    pub fn yearly_counts(&self) -> YearlyCounts {
        let mut counts = YearlyCounts::new();
        for day in self.completion_days() {
            *counts.entry(day.year()).or_insert(0) += 1;
        }
        counts
    }

    /// Monday-first weeks covering the month that contains `any_day`.
    pub fn month_grid(&self, any_day: NaiveDate) -> MonthGrid {
        let first = any_day.with_day(1).unwrap_or(any_day);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        let completed: HashSet<NaiveDate> = self.completion_days().collect();

        let mut weeks = Vec::new();
        let mut week_start = start_of_week(first);
        while week_start <= last {
            let week = std::array::from_fn(|offset| {
                let date = week_start + Days::new(offset as u64);
                CalendarCell {
                    date,
                    in_month: date.month() == first.month() && date.year() == first.year(),
                    completed: completed.contains(&date),
                }
            });
            weeks.push(week);
            week_start = week_start + Days::new(DAYS_PER_WEEK as u64);
        }

        MonthGrid { year: first.year(), month: first.month(), weeks }
    }

    fn completion_days(&self) -> impl Iterator<Item = NaiveDate> + 'a {
        let habits = self.habits;
        habits.iter().filter_map(Habit::completion).map(start_of_day)
    }
}
