//! Dashboard analytics over realistic habit lists

mod support;

use std::sync::Arc;

use chrono::{Days, NaiveDate, TimeZone, Utc};
use streakline_common::testing::MockClock;
use streakline_core::{AnalyticsService, CalendarAggregator, StreakCalculator};
use streakline_domain::{Habit, HabitStats};
use support::{habit, local, local_offset};

fn service(now: &str) -> AnalyticsService {
    AnalyticsService::new(Arc::new(MockClock::at_local(local(now), local_offset())))
}

fn completed(id: i64, day: NaiveDate, time: (u32, u32)) -> Habit {
    let mut h = habit(id, "Meditate", Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap());
    h.set_completed(true, day.and_hms_opt(time.0, time.1, 0).unwrap());
    h
}

/// Validates the dashboard numbers for the canonical three-habit list.
///
/// Assertions:
/// - current and longest streak are both two days
/// - only completed habits count as completed
#[test]
fn test_end_to_end_dashboard_stats() {
    let service = service("2024-09-18 20:00:00");
    let today = service.today();
    let habits = vec![
        completed(1, today, (7, 30)),
        completed(2, today - Days::new(1), (21, 0)),
        habit(3, "Stretch", Utc.with_ymd_and_hms(2024, 9, 18, 18, 0, 0).unwrap()),
    ];

    assert_eq!(
        service.stats(&habits),
        HabitStats { total_habits: 3, completed_habits: 2, current_streak: 2, longest_streak: 2 }
    );
}

/// Validates that the same two same-day completions are one streak day but
/// two units in every count.
#[test]
fn test_same_day_duplicates_streak_versus_counts() {
    let today = NaiveDate::from_ymd_opt(2024, 9, 18).unwrap();
    let habits = vec![completed(1, today, (8, 0)), completed(2, today, (19, 45))];

    let streaks = StreakCalculator::new(&habits);
    assert_eq!(streaks.current_streak(today), 1);
    assert_eq!(streaks.longest_streak(), 1);

    let calendar = CalendarAggregator::new(&habits);
    assert_eq!(calendar.monthly_counts(today)[8], 2);
    assert_eq!(calendar.yearly_counts().get(&2024), Some(&2));
}

/// Validates that a long history that stopped yesterday reads as no current
/// streak while keeping its longest streak.
#[test]
fn test_broken_streak_keeps_history() {
    let service = service("2024-09-18 08:00:00");
    let today = service.today();
    let habits: Vec<_> =
        (1..=14).map(|n| completed(n as i64, today - Days::new(n), (12, 0))).collect();

    let snapshot = service.snapshot(&habits);

    assert_eq!(snapshot.stats.current_streak, 0);
    assert_eq!(snapshot.stats.longest_streak, 14);
    // 2024-09-18 is a Wednesday; Monday and Tuesday of this week are in range
    assert_eq!(snapshot.weekly, [1, 1, 0, 0, 0, 0, 0]);
    assert_eq!(snapshot.monthly[8], 14);
}

/// Validates the year boundary for monthly versus yearly counts.
#[test]
fn test_new_year_counts() {
    let service = service("2025-01-02 09:00:00");
    let habits = vec![
        completed(1, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), (23, 59)),
        completed(2, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), (0, 1)),
        completed(3, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), (8, 0)),
    ];

    let snapshot = service.snapshot(&habits);

    assert_eq!(snapshot.monthly[0], 2);
    assert_eq!(snapshot.monthly.iter().sum::<u32>(), 2);
    assert_eq!(snapshot.yearly.get(&2024), Some(&1));
    assert_eq!(snapshot.yearly.get(&2025), Some(&2));
    // 2024-12-30 is the Monday of this week
    assert_eq!(snapshot.weekly, [0, 1, 1, 1, 0, 0, 0]);
    assert_eq!(snapshot.stats.current_streak, 3);
}
