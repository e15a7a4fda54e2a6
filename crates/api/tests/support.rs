//! Shared fixtures for `streakline-app` integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDateTime};
use parking_lot::Mutex;
use streakline_app::AppContext;
use streakline_common::testing::{ManualScheduler, MockClock};
use streakline_domain::{
    Config, HabitSourceConfig, LedgerConfig, LoggingConfig, NotificationConfig,
};
use streakline_infra::TerminalPlatform;
use tempfile::TempDir;

/// Writer that keeps everything printed by the terminal platform.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .expect("terminal output is UTF-8")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Habit list used across the app tests.
///
/// With the local clock at 2024-05-08 18:00 (UTC+2): "Read" is due in three
/// hours, "Run" is done today, "Floss" was done yesterday and "Review week"
/// is a weekly habit due tomorrow.
pub const HABITS: &str = r#"[
    {"id": 1, "name": "Read", "reminderTime": "2024-05-08T19:00:00Z"},
    {"id": 2, "name": "Run", "reminderTime": "2024-05-08T06:00:00Z",
     "completed": true, "completedAt": "2024-05-08T08:15:00"},
    {"id": 3, "name": "Review week", "reminderTime": "2024-05-09T09:00:00Z",
     "recurrence": "weekly"},
    {"id": 4, "name": "Floss", "reminderTime": "2024-05-07T20:00:00Z",
     "completed": true, "completedAt": "2024-05-07T21:30:00"}
]"#;

pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).expect("valid offset")
}

pub fn local(datetime: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S").expect("valid local time")
}

/// Configuration pointing at files inside `dir`.
pub fn config_in(dir: &TempDir, notifications: NotificationConfig) -> Config {
    Config {
        habits: HabitSourceConfig {
            path: dir.path().join("habits.json").to_string_lossy().into_owned(),
        },
        notifications,
        ledger: LedgerConfig {
            path: dir.path().join("state").join("reminders.json").to_string_lossy().into_owned(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Application context over temporary files and virtual time.
pub struct TestApp {
    pub ctx: AppContext,
    pub clock: MockClock,
    pub scheduler: ManualScheduler,
    pub output: Captured,
    pub dir: TempDir,
}

impl TestApp {
    /// Write `habits` to disk and wire a context whose local clock reads
    /// 2024-05-08 18:00.
    pub fn new(habits: &str, notifications: NotificationConfig) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_in(&dir, notifications);
        std::fs::write(&config.habits.path, habits).expect("write habits");

        let clock = MockClock::at_local(local("2024-05-08 18:00:00"), local_offset());
        let scheduler = ManualScheduler::with_clock(clock.clone());
        let output = Captured::default();
        let platform = Arc::new(TerminalPlatform::with_writer(
            &config.notifications,
            Box::new(output.clone()),
        ));

        let ctx = AppContext::with_services(
            config,
            Arc::new(clock.clone()),
            Arc::new(scheduler.clone()),
            platform,
        );

        Self { ctx, clock, scheduler, output, dir }
    }
}
