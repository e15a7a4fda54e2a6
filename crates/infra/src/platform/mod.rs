//! Platform adapters for notifications and user feedback
//!
//! The terminal platform stands in for a desktop notification centre: it
//! prints notifications to a writer and answers permission prompts from
//! configuration.

pub mod feedback;
pub mod terminal;

pub use feedback::TracingFeedback;
pub use terminal::TerminalPlatform;
