//! Shared test helpers for `streakline-core` integration tests.
//!
//! In-memory fakes for every notification port plus a harness that wires a
//! `ReminderScheduler` to a mock clock and a manual scheduler.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use parking_lot::Mutex;
use streakline_common::testing::{Clock, ManualScheduler, MockClock};
use streakline_core::{
    NotificationGate, NotificationPlatform, PlatformError, ReminderLedger, ReminderScheduler,
    UserFeedback,
};
use streakline_domain::{
    Habit, HabitId, Notification, PlatformPermission, Recurrence, Result as DomainResult,
    StreaklineError,
};
use uuid::Uuid;

/// Notification platform that records what it was asked to do.
pub struct FakePlatform {
    supported: bool,
    permission: Mutex<PlatformPermission>,
    answer: Mutex<Result<PlatformPermission, PlatformError>>,
    failing: Mutex<HashSet<HabitId>>,
    shown: Mutex<Vec<Notification>>,
    prompts: AtomicUsize,
}

impl FakePlatform {
    pub fn with_permission(permission: PlatformPermission) -> Self {
        Self {
            supported: true,
            permission: Mutex::new(permission),
            answer: Mutex::new(Ok(PlatformPermission::Granted)),
            failing: Mutex::new(HashSet::new()),
            shown: Mutex::new(Vec::new()),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn granted() -> Self {
        Self::with_permission(PlatformPermission::Granted)
    }

    pub fn unsupported() -> Self {
        Self { supported: false, ..Self::with_permission(PlatformPermission::Default) }
    }

    /// Answer permission prompts with `answer`.
    pub fn answering(self, answer: Result<PlatformPermission, PlatformError>) -> Self {
        *self.answer.lock() = answer;
        self
    }

    /// Change the permission as if the user did it in system settings.
    pub fn set_permission(&self, permission: PlatformPermission) {
        *self.permission.lock() = permission;
    }

    pub fn fail_for(&self, habit_id: HabitId) {
        self.failing.lock().insert(habit_id);
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().clone()
    }

    pub fn shown_bodies(&self) -> Vec<String> {
        self.shown.lock().iter().map(|n| n.body.clone()).collect()
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationPlatform for FakePlatform {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> PlatformPermission {
        *self.permission.lock()
    }

    async fn request_permission(&self) -> Result<PlatformPermission, PlatformError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let answer = self.answer.lock().clone();
        if let Ok(permission) = &answer {
            *self.permission.lock() = *permission;
        }
        answer
    }

    fn show(&self, notification: &Notification) -> Result<(), PlatformError> {
        let failing = notification.habit_id.is_some_and(|id| self.failing.lock().contains(&id));
        if failing {
            return Err(PlatformError::Display("window closed".to_string()));
        }
        self.shown.lock().push(notification.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// User feedback sink that keeps every message.
#[derive(Default)]
pub struct RecordingFeedback {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingFeedback {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().clone()
    }

    pub fn count(&self, level: Level, message: &str) -> usize {
        self.messages.lock().iter().filter(|(l, m)| *l == level && m == message).count()
    }
}

impl UserFeedback for RecordingFeedback {
    fn success(&self, message: &str) {
        self.messages.lock().push((Level::Success, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.messages.lock().push((Level::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().push((Level::Error, message.to_string()));
    }
}

/// In-memory reminder ledger.
#[derive(Default)]
pub struct MemoryLedger {
    entries: Mutex<HashMap<HabitId, Uuid>>,
    fail: bool,
}

impl MemoryLedger {
    pub fn seeded(entries: impl IntoIterator<Item = (HabitId, Uuid)>) -> Self {
        Self { entries: Mutex::new(entries.into_iter().collect()), fail: false }
    }

    pub fn failing() -> Self {
        Self { entries: Mutex::default(), fail: true }
    }

    pub fn entries(&self) -> HashMap<HabitId, Uuid> {
        self.entries.lock().clone()
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail {
            Err(StreaklineError::Io("ledger offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReminderLedger for MemoryLedger {
    async fn load(&self) -> DomainResult<HashMap<HabitId, Uuid>> {
        self.check()?;
        Ok(self.entries())
    }

    async fn record(&self, habit_id: HabitId, handle_id: Uuid) -> DomainResult<()> {
        self.check()?;
        self.entries.lock().insert(habit_id, handle_id);
        Ok(())
    }

    async fn remove(&self, habit_id: HabitId) -> DomainResult<()> {
        self.check()?;
        self.entries.lock().remove(&habit_id);
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.check()?;
        self.entries.lock().clear();
        Ok(())
    }
}

/// Local zone used by the harness (UTC+02:00).
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Parse `YYYY-MM-DD HH:MM:SS` as local wall-clock time.
pub fn local(datetime: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Daily habit due at `reminder_time`, not completed.
pub fn habit(id: i64, name: &str, reminder_time: DateTime<Utc>) -> Habit {
    Habit::new(HabitId(id), name, reminder_time)
}

pub fn with_recurrence(mut habit: Habit, recurrence: Recurrence) -> Habit {
    habit.recurrence = recurrence;
    habit
}

/// Reminder scheduler wired to fakes and virtual time.
pub struct Harness {
    pub clock: MockClock,
    pub scheduler: ManualScheduler,
    pub platform: Arc<FakePlatform>,
    pub feedback: Arc<RecordingFeedback>,
    pub gate: Arc<NotificationGate>,
    pub reminders: ReminderScheduler,
}

impl Harness {
    /// Harness whose local wall clock reads `now`.
    pub fn new(platform: FakePlatform, now: NaiveDateTime) -> Self {
        Self::build(platform, MockClock::at_local(now, local_offset()), None)
    }

    /// Harness driven by a caller-built clock, e.g. one with offset changes.
    pub fn with_clock(platform: FakePlatform, clock: MockClock) -> Self {
        Self::build(platform, clock, None)
    }

    pub fn with_ledger(
        platform: FakePlatform,
        now: NaiveDateTime,
        ledger: Arc<MemoryLedger>,
    ) -> Self {
        Self::build(platform, MockClock::at_local(now, local_offset()), Some(ledger))
    }

    fn build(platform: FakePlatform, clock: MockClock, ledger: Option<Arc<MemoryLedger>>) -> Self {
        let scheduler = ManualScheduler::with_clock(clock.clone());
        let platform = Arc::new(platform);
        let feedback = Arc::new(RecordingFeedback::default());
        let gate = Arc::new(NotificationGate::new(platform.clone(), feedback.clone()));

        let mut reminders = ReminderScheduler::new(
            Arc::clone(&gate),
            platform.clone(),
            feedback.clone(),
            Arc::new(scheduler.clone()),
            Arc::new(clock.clone()),
        );
        if let Some(ledger) = ledger {
            reminders = reminders.with_ledger(ledger);
        }

        Self { clock, scheduler, platform, feedback, gate, reminders }
    }

    /// Instant `by` after the harness clock's current time.
    pub fn in_future(&self, by: chrono::Duration) -> DateTime<Utc> {
        self.clock.now() + by
    }
}
