//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Habit defaults (mirrors the backend column defaults)
pub const DEFAULT_CATEGORY: &str = "general";

// Achievement thresholds
pub const CONSISTENCY_STREAK_DAYS: u32 = 7;
pub const HABIT_MASTER_COMPLETIONS: usize = 50;

// Notification copy
pub const REMINDER_TITLE: &str = "Habit Reminder";
pub const MISSED_HABIT_TITLE: &str = "Missed Habit";
pub const NOTIFICATIONS_ENABLED_MESSAGE: &str = "Notifications enabled successfully!";
pub const NOTIFICATIONS_REQUIRED_MESSAGE: &str = "Please enable notifications to receive reminders";
pub const NOTIFICATIONS_UNSUPPORTED_MESSAGE: &str = "Your platform does not support notifications";
pub const PERMISSION_REQUEST_FAILED_MESSAGE: &str = "Error requesting notification permission";
pub const REMINDER_IN_PAST_MESSAGE: &str = "Reminder time must be in the future";
pub const SHOW_NOTIFICATION_FAILED_MESSAGE: &str = "Error showing notification";
pub const SHOW_MISSED_NOTIFICATION_FAILED_MESSAGE: &str = "Error showing missed notification";

// Calendar bucketing
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTHS_PER_YEAR: usize = 12;
