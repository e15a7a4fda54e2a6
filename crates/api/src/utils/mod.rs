//! Application utilities

pub mod logging;

pub use logging::{error_label, init_tracing, log_command_execution};
