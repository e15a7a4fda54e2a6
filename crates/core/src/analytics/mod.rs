//! Habit analytics engine
//!
//! Everything in here is synchronous and total: malformed completion
//! records are skipped, never reported as errors.

pub mod achievements;
pub mod bucketing;
pub mod calendar;
pub mod service;
pub mod streaks;

pub use achievements::achievements_for;
pub use calendar::CalendarAggregator;
pub use service::AnalyticsService;
pub use streaks::StreakCalculator;
