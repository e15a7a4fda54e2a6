//! Integration tests for AppContext lifecycle
//!
//! The context can be built inside a runtime, refuses to start outside one,
//! and shutdown releases every timer that startup armed.

mod support;

use std::time::Duration;

use streakline_app::commands::start_reminders;
use streakline_app::AppContext;
use streakline_core::PermissionState;
use streakline_domain::{NotificationConfig, PlatformPermission, StreaklineError};
use support::{config_in, TestApp, HABITS};

fn granted() -> NotificationConfig {
    NotificationConfig { permission: PlatformPermission::Granted, ..NotificationConfig::default() }
}

#[tokio::test]
async fn test_context_creation_succeeds_inside_runtime() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ctx = AppContext::new(config_in(&dir, granted())).expect("context should build");

    assert_eq!(ctx.gate.state(), PermissionState::Granted);
    assert_eq!(ctx.reminders.pending_reminders(), 0);
    assert_eq!(ctx.shutdown(), 0);
}

#[test]
fn test_context_creation_fails_without_runtime() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = AppContext::new(config_in(&dir, granted()));

    assert!(matches!(result, Err(StreaklineError::Internal(_))));
}

#[tokio::test]
async fn test_initial_permission_follows_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    let unsupported = NotificationConfig { supported: false, ..NotificationConfig::default() };

    let ctx = AppContext::new(config_in(&dir, unsupported)).expect("context should build");
    assert_eq!(ctx.gate.state(), PermissionState::Unsupported);

    let ctx = AppContext::new(config_in(&dir, NotificationConfig::default()))
        .expect("context should build");
    assert_eq!(ctx.gate.state(), PermissionState::Undetermined);
}

/// Validates that shutdown cancels restored reminders and the sweep.
#[tokio::test]
async fn test_shutdown_cancels_all_timers() {
    let app = TestApp::new(HABITS, granted());
    let summary = start_reminders(&app.ctx).await.expect("startup succeeds");

    assert_eq!(summary.restore.scheduled, 2);
    assert!(summary.sweep_armed);
    assert_eq!(app.scheduler.pending(), 3, "two reminders plus the sweep");

    assert_eq!(app.ctx.shutdown(), 2);
    assert_eq!(app.scheduler.pending(), 0);
    assert!(!app.ctx.reminders.sweep_active());

    // Nothing fires after shutdown
    app.scheduler.advance(Duration::from_secs(2 * 24 * 3600));
    assert!(app.output.lines().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_backed_reminder_fires_and_shutdown_is_clean() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(&dir, granted());
    let reminder_at = chrono::Utc::now() + chrono::Duration::minutes(5);
    let habits = format!(
        r#"[{{"id": 7, "name": "Stretch", "reminderTime": "{}"}}]"#,
        reminder_at.to_rfc3339()
    );
    std::fs::write(&config.habits.path, habits).expect("write habits");

    let ctx = AppContext::new(config).expect("context should build");
    let summary = start_reminders(&ctx).await.expect("startup succeeds");
    assert_eq!(summary.restore.scheduled, 1);
    assert_eq!(ctx.reminders.pending_reminders(), 1);

    tokio::time::sleep(Duration::from_secs(6 * 60)).await;
    tokio::task::yield_now().await;

    assert_eq!(ctx.reminders.pending_reminders(), 0, "fired reminders leave the registry");
    assert_eq!(ctx.shutdown(), 0);
}
