//! # Streakline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Habit analytics (day bucketing, streaks, calendar aggregation)
//! - Notification permission gate and reminder scheduling
//! - Port interfaces (traits) for every external collaborator
//!
//! ## Architecture Principles
//! - Only depends on `streakline-common` and `streakline-domain`
//! - No file, network, or platform code
//! - Time and timers are injected (`Clock`, `TaskScheduler`)

pub mod analytics;
pub mod habits;
pub mod notifications;

// Re-export specific items to avoid ambiguity
pub use analytics::{AnalyticsService, CalendarAggregator, StreakCalculator};
pub use habits::ports::HabitSource;
pub use notifications::ports::{NotificationPlatform, PlatformError, ReminderLedger, UserFeedback};
pub use notifications::{
    NotificationGate, PermissionState, ReminderError, ReminderScheduler, RestoreReport,
    ScheduledReminder,
};
