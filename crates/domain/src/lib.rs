//! # Streakline Domain
//!
//! Business domain types and models for Streakline.
//!
//! This crate contains:
//! - Habit records as delivered by the habit API
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Analytics records (stats, achievements, calendar cells)
//!
//! ## Architecture
//! - No dependencies on other Streakline crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
