//! # Streakline App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - Command handlers (`dashboard`, `calendar`, `run`)
//! - Application context (dependency injection)
//! - Argument parsing and logging setup
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires the ports defined in `core` to the adapters in `infra`

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::{build_cli, Invocation};
pub use context::AppContext;
