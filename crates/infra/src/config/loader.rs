//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variable is missing, falls back to a config file
//! 3. Probes several directories for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `STREAKLINE_HABITS_PATH`: Habit list JSON file (required)
//! - `STREAKLINE_LEDGER_PATH`: Reminder ledger file
//! - `STREAKLINE_NOTIFICATIONS_SUPPORTED`: Platform can notify (true/false)
//! - `STREAKLINE_NOTIFICATION_PERMISSION`: `granted`, `denied` or `default`
//! - `STREAKLINE_GRANT_ON_REQUEST`: Answer to permission prompts (true/false)
//! - `STREAKLINE_SWEEP_ENABLED`: Arm the midnight sweep (true/false)
//! - `STREAKLINE_LOG_LEVEL`: Default log filter
//! - `STREAKLINE_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `streakline.{json,toml}` in:
//! 1. The current working directory
//! 2. Its parent and grandparent
//! 3. The executable's directory

use std::path::{Path, PathBuf};

use streakline_domain::{
    Config, HabitSourceConfig, LedgerConfig, LoggingConfig, NotificationConfig,
    PlatformPermission, Result, StreaklineError,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "streakline.json", "streakline.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `StreaklineError::Config` if neither the environment nor any
/// config file yields a valid configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `STREAKLINE_HABITS_PATH` is required; everything else falls back to
/// the section defaults.
///
/// # Errors
/// Returns `StreaklineError::Config` if the habits path is missing or the
/// permission value is not recognised.
pub fn load_from_env() -> Result<Config> {
    let habits_path = env_var("STREAKLINE_HABITS_PATH")?;

    let defaults = NotificationConfig::default();
    let permission = match std::env::var("STREAKLINE_NOTIFICATION_PERMISSION") {
        Ok(value) => value.parse::<PlatformPermission>().map_err(StreaklineError::Config)?,
        Err(_) => defaults.permission,
    };

    let ledger = std::env::var("STREAKLINE_LEDGER_PATH")
        .map(|path| LedgerConfig { path })
        .unwrap_or_default();

    let log_defaults = LoggingConfig::default();

    Ok(Config {
        habits: HabitSourceConfig { path: habits_path },
        notifications: NotificationConfig {
            supported: env_bool("STREAKLINE_NOTIFICATIONS_SUPPORTED", defaults.supported),
            permission,
            grant_on_request: env_bool("STREAKLINE_GRANT_ON_REQUEST", defaults.grant_on_request),
            sweep_enabled: env_bool("STREAKLINE_SWEEP_ENABLED", defaults.sweep_enabled),
        },
        ledger,
        logging: LoggingConfig {
            level: std::env::var("STREAKLINE_LOG_LEVEL").unwrap_or(log_defaults.level),
            json: env_bool("STREAKLINE_LOG_JSON", log_defaults.json),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see
/// [`probe_config_paths`]). Format is chosen by file extension.
///
/// # Errors
/// Returns `StreaklineError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(StreaklineError::Config(format!("Config file not found: {}", p.display())));
        }
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            StreaklineError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StreaklineError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StreaklineError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StreaklineError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(StreaklineError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        StreaklineError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
