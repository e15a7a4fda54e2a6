//! Analytics output records
//!
//! Everything here is derived from the habit list by the analytics engine
//! and handed to rendering as-is.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_WEEK, MONTHS_PER_YEAR};

/* -------------------------------------------------------------------------- */
/* Dashboard Statistics */
/* -------------------------------------------------------------------------- */

/// Scalar dashboard statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    /// Number of habits in the list
    pub total_habits: usize,

    /// Number of habits flagged completed
    pub completed_habits: usize,

    /// Consecutive days ending today with at least one completion
    pub current_streak: u32,

    /// Longest run of consecutive completion days on record
    pub longest_streak: u32,
}

/// Completion counts Monday..Sunday for the current week
pub type WeeklyCounts = [u32; DAYS_PER_WEEK];

/// Completion counts January..December for the current year
pub type MonthlyCounts = [u32; MONTHS_PER_YEAR];

/// Completion counts per calendar year, over the whole history
pub type YearlyCounts = BTreeMap<i32, u32>;

/* -------------------------------------------------------------------------- */
/* Achievements */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    GettingStarted,
    ConsistencyKing,
    HabitMaster,
    AchievementHunter,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 4] = [
        AchievementKind::GettingStarted,
        AchievementKind::ConsistencyKing,
        AchievementKind::HabitMaster,
        AchievementKind::AchievementHunter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::GettingStarted => "Getting Started",
            Self::ConsistencyKing => "Consistency King",
            Self::HabitMaster => "Habit Master",
            Self::AchievementHunter => "Achievement Hunter",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GettingStarted => "Create your first habit",
            Self::ConsistencyKing => "Maintain a 7-day streak",
            Self::HabitMaster => "Complete 50 habits",
            Self::AchievementHunter => "Unlock all other achievements",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub kind: AchievementKind,
    pub unlocked: bool,
}

/* -------------------------------------------------------------------------- */
/* Calendar */
/* -------------------------------------------------------------------------- */

/// One day of the month calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    /// At least one completion on this date
    pub completed: bool,
}

/// Monday-first weeks covering a whole month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[CalendarCell; DAYS_PER_WEEK]>,
}

/* -------------------------------------------------------------------------- */
/* Dashboard Snapshot */
/* -------------------------------------------------------------------------- */

/// Everything the dashboard renders, computed at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: HabitStats,
    pub weekly: WeeklyCounts,
    pub monthly: MonthlyCounts,
    pub yearly: YearlyCounts,
    pub achievements: Vec<Achievement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = HabitStats {
            total_habits: 3,
            completed_habits: 2,
            current_streak: 2,
            longest_streak: 2,
        };
        let value = serde_json::to_value(stats).unwrap();

        assert_eq!(value["totalHabits"], 3);
        assert_eq!(value["completedHabits"], 2);
        assert_eq!(value["currentStreak"], 2);
        assert_eq!(value["longestStreak"], 2);
    }

    #[test]
    fn test_yearly_counts_serialize_sorted() {
        let mut yearly = YearlyCounts::new();
        yearly.insert(2024, 5);
        yearly.insert(2022, 1);

        let json = serde_json::to_string(&yearly).unwrap();
        assert_eq!(json, r#"{"2022":1,"2024":5}"#);
    }

    #[test]
    fn test_achievement_titles_are_distinct() {
        let titles: std::collections::HashSet<_> =
            AchievementKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles.len(), AchievementKind::ALL.len());
    }
}
