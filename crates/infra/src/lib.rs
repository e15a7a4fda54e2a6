//! # Streakline Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment and JSON/TOML files)
//! - JSON file adapters for the habit list and the reminder ledger
//! - Terminal notification platform and log-backed user feedback
//!
//! ## Architecture
//! - Implements traits defined in `streakline-core`
//! - Contains all "impure" code (file I/O, terminal output)

pub mod config;
pub mod errors;
pub mod habits;
pub mod ledger;
pub mod platform;

// Re-export commonly used items
pub use errors::InfraError;
pub use habits::JsonHabitSource;
pub use ledger::JsonReminderLedger;
pub use platform::{TerminalPlatform, TracingFeedback};
