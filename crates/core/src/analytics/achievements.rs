//! Dashboard achievements derived from habit statistics

use streakline_domain::constants::{CONSISTENCY_STREAK_DAYS, HABIT_MASTER_COMPLETIONS};
use streakline_domain::{Achievement, AchievementKind, HabitStats};

/// Unlock state of every achievement, in display order.
pub fn achievements_for(stats: &HabitStats) -> Vec<Achievement> {
    let consistent = stats.current_streak >= CONSISTENCY_STREAK_DAYS;
    let master = stats.completed_habits >= HABIT_MASTER_COMPLETIONS;

    AchievementKind::ALL
        .into_iter()
        .map(|kind| {
            let unlocked = match kind {
                AchievementKind::GettingStarted => true,
                AchievementKind::ConsistencyKing => consistent,
                AchievementKind::HabitMaster => master,
                AchievementKind::AchievementHunter => consistent && master,
            };
            Achievement { kind, unlocked }
        })
        .collect()
}
