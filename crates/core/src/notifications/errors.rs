//! Reminder scheduling errors

use chrono::{DateTime, Utc};
use streakline_domain::{HabitId, StreaklineError};
use thiserror::Error;

use super::gate::PermissionState;

/// Why a reminder was not armed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    /// The reminder time is not strictly in the future
    #[error("reminder time {reminder_time} for habit {habit_id} is not in the future")]
    Validation { habit_id: HabitId, reminder_time: DateTime<Utc> },

    /// Notifications are not granted; scheduling is skipped until they are
    #[error("notification permission is {0}")]
    Permission(PermissionState),
}

impl From<ReminderError> for StreaklineError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::Validation { .. } => StreaklineError::InvalidInput(err.to_string()),
            ReminderError::Permission(_) => StreaklineError::Platform(err.to_string()),
        }
    }
}
