//! Notification permission and reminder scheduling
//!
//! [`NotificationGate`] tracks what the platform allows; [`ReminderScheduler`]
//! owns every armed timer (one-shot habit reminders and the recurring
//! midnight sweep). Both are constructed once per process and passed around
//! explicitly.

mod dispatch;
pub mod errors;
pub mod gate;
pub mod ports;
pub mod reminders;
mod sweep;

pub use errors::ReminderError;
pub use gate::{NotificationGate, PermissionState};
pub use reminders::{ReminderScheduler, RestoreReport, ScheduledReminder};
