//! Configuration structures
//!
//! Loaded by `streakline_infra::config` from the environment or a
//! JSON/TOML file. Every section has serde defaults so partial files work.

use serde::{Deserialize, Serialize};

use crate::types::PlatformPermission;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub habits: HabitSourceConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the habit list is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSourceConfig {
    /// Path to a JSON array of habit records
    pub path: String,
}

/// Behaviour of the local notification platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether the platform can show notifications at all
    pub supported: bool,
    /// Permission reported by the platform at startup
    pub permission: PlatformPermission,
    /// Answer given when the platform is asked for permission
    pub grant_on_request: bool,
    /// Arm the midnight missed-habit sweep in `run`
    pub sweep_enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            supported: true,
            permission: PlatformPermission::Default,
            grant_on_request: true,
            sweep_enabled: true,
        }
    }
}

/// Best-effort habit -> handle bookkeeping file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub path: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { path: "reminders.json".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
