//! Command handlers
//!
//! Each handler takes the [`AppContext`](crate::AppContext), does one job
//! and returns a serializable result; printing is left to `main`.

pub mod analytics;
pub mod calendar;
pub mod reminders;

pub use analytics::dashboard;
pub use calendar::calendar;
pub use reminders::{start_reminders, RunSummary};
