//! Notification payloads and platform permission values

use serde::{Deserialize, Serialize};

use crate::constants::{MISSED_HABIT_TITLE, REMINDER_TITLE};
use crate::impl_domain_enum_conversions;
use crate::types::habit::HabitId;

/// Permission answer reported by a notification platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformPermission {
    Granted,
    Denied,
    /// The user has not been asked yet
    #[default]
    Default,
}

impl_domain_enum_conversions!(PlatformPermission {
    Granted => "granted",
    Denied => "denied",
    Default => "default",
});

/// A notification ready to be shown by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Habit the notification refers to, used for click-through
    pub habit_id: Option<HabitId>,
}

impl Notification {
    /// One-shot reminder shown at a habit's reminder time
    pub fn reminder(habit_id: HabitId, habit_name: &str) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: format!("Time to complete your habit: {habit_name}"),
            habit_id: Some(habit_id),
        }
    }

    /// Notification emitted by the midnight sweep
    pub fn missed(habit_id: HabitId, habit_name: &str) -> Self {
        Self {
            title: MISSED_HABIT_TITLE.to_string(),
            body: format!("You missed your daily habit: {habit_name}"),
            habit_id: Some(habit_id),
        }
    }
}
