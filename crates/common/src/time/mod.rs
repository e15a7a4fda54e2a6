//! Time utilities and abstractions
//!
//! - **Clock abstractions**: real and mock wall clocks (re-exported from
//!   testing)
//! - **[`timer`]**: cancellable one-shot deferred tasks and the schedulers
//!   that run them

pub mod timer;

// Re-export commonly used items
pub use timer::{DeferredTask, SchedulerError, TaskScheduler, TimerHandle, TokioTaskScheduler};

// Re-export Clock abstractions from testing module
pub use crate::testing::time::{Clock, MockClock, SystemClock};
