//! Common runtime utilities shared across Streakline crates.
//!
//! # Feature Tiers
//!
//! - `runtime` (default): tokio-backed deferred task scheduling
//! - `test-utils`: deterministic clock and scheduler doubles for downstream
//!   test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "runtime", feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(any(feature = "runtime", feature = "test-utils", test))]
pub use testing::{Clock, MockClock, SystemClock};
#[cfg(feature = "runtime")]
pub use time::{DeferredTask, TaskScheduler, TimerHandle, TokioTaskScheduler};
