//! Dashboard analytics service

use std::sync::Arc;

use chrono::NaiveDate;
use streakline_common::Clock;
use streakline_domain::{DashboardSnapshot, Habit, HabitStats, MonthGrid};
use tracing::{debug, instrument};

use super::achievements::achievements_for;
use super::calendar::CalendarAggregator;
use super::streaks::StreakCalculator;

/// Computes dashboard views as of the injected clock's local "today"
pub struct AnalyticsService {
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Local calendar day according to the clock
    pub fn today(&self) -> NaiveDate {
        self.clock.local_now().date()
    }

    pub fn stats(&self, habits: &[Habit]) -> HabitStats {
        stats_on(habits, self.today())
    }

    /// Stats, chart series and achievements in one pass over the same "today"
    #[instrument(skip_all, fields(habits = habits.len()))]
    pub fn snapshot(&self, habits: &[Habit]) -> DashboardSnapshot {
        let today = self.today();
        let calendar = CalendarAggregator::new(habits);

        let stats = stats_on(habits, today);
        debug!(%today, current_streak = stats.current_streak, "Computed dashboard stats");

        DashboardSnapshot {
            stats,
            weekly: calendar.weekly_counts(today),
            monthly: calendar.monthly_counts(today),
            yearly: calendar.yearly_counts(),
            achievements: achievements_for(&stats),
        }
    }

    /// Month calendar for `month` (any day within it), defaulting to the
    /// current month
    pub fn month_grid(&self, habits: &[Habit], month: Option<NaiveDate>) -> MonthGrid {
        CalendarAggregator::new(habits).month_grid(month.unwrap_or_else(|| self.today()))
    }
}

fn stats_on(habits: &[Habit], today: NaiveDate) -> HabitStats {
    let streaks = StreakCalculator::new(habits);
    HabitStats {
        total_habits: habits.len(),
        completed_habits: habits.iter().filter(|habit| habit.completed).count(),
        current_streak: streaks.current_streak(today),
        longest_streak: streaks.longest_streak(),
    }
}
