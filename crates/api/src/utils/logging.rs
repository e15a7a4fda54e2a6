use std::time::Duration;

use streakline_domain::{LoggingConfig, Result, StreaklineError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.level`. Output goes to stderr so command
/// results on stdout stay machine-readable.
///
/// # Errors
/// Returns `StreaklineError::Config` for an unparseable level and
/// `StreaklineError::Internal` if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|err| StreaklineError::Internal(format!("failed to install logger: {err}")))
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|err| {
            StreaklineError::Config(format!("invalid log level '{}': {err}", config.level))
        }),
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a logical identifier such as `"analytics::dashboard"`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `StreaklineError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &StreaklineError) -> &'static str {
    match error {
        StreaklineError::Config(_) => "config",
        StreaklineError::Platform(_) => "platform",
        StreaklineError::Io(_) => "io",
        StreaklineError::NotFound(_) => "not_found",
        StreaklineError::InvalidInput(_) => "invalid_input",
        StreaklineError::Internal(_) => "internal",
    }
}
