//! Testing utilities and helpers
//!
//! - **[`time`]**: wall-clock abstraction with a controllable mock
//! - **[`scheduler`]**: deterministic deferred-task scheduler
//!
//! ## Usage
//!
//! ```rust
//! use streakline_common::testing::{ManualScheduler, MockClock};
//!
//! let clock = MockClock::new();
//! let scheduler = ManualScheduler::with_clock(clock.clone());
//! scheduler.advance(std::time::Duration::from_secs(5));
//! ```

#[cfg(feature = "runtime")]
pub mod scheduler;
pub mod time;

#[cfg(feature = "runtime")]
pub use scheduler::ManualScheduler;
pub use time::{Clock, MockClock, SystemClock};
