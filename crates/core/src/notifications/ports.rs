//! Port interfaces for notification delivery
//!
//! These traits define the boundaries between the reminder logic and the
//! platform that actually prompts, displays, and persists.

use std::collections::HashMap;

use async_trait::async_trait;
use streakline_domain::{HabitId, Notification, PlatformPermission, Result};
use thiserror::Error;
use uuid::Uuid;

/// Failures raised by a notification platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("notifications are not supported on this platform")]
    Unsupported,

    #[error("permission request failed: {0}")]
    PermissionRequest(String),

    #[error("failed to show notification: {0}")]
    Display(String),
}

/// Trait for the platform's notification capability
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// Whether notifications exist at all on this platform
    fn is_supported(&self) -> bool;

    /// Current permission, without prompting
    fn permission(&self) -> PlatformPermission;

    /// Prompt the user for permission
    async fn request_permission(&self) -> std::result::Result<PlatformPermission, PlatformError>;

    /// Display a notification immediately
    fn show(&self, notification: &Notification) -> std::result::Result<(), PlatformError>;
}

/// Trait for surfacing short messages to the user (toasts, status lines)
pub trait UserFeedback: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Trait for best-effort habit -> timer handle bookkeeping
///
/// Handles are process-local. Entries loaded after a restart only identify
/// timers that no longer exist and are good for cleanup, nothing else.
#[async_trait]
pub trait ReminderLedger: Send + Sync {
    /// Load every recorded entry
    async fn load(&self) -> Result<HashMap<HabitId, Uuid>>;

    /// Record the handle armed for a habit, replacing any previous entry
    async fn record(&self, habit_id: HabitId, handle_id: Uuid) -> Result<()>;

    /// Forget a habit's entry
    async fn remove(&self, habit_id: HabitId) -> Result<()>;

    /// Forget every entry
    async fn clear(&self) -> Result<()>;
}
