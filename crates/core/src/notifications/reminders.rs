//! Reminder scheduling service
//!
//! Owns every live timer: one one-shot reminder per habit plus the single
//! recurring missed-habit sweep. Timers are process-local; after a restart
//! reminders are re-derived from each habit's `reminder_time` by
//! [`ReminderScheduler::restore_reminders`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use streakline_common::{Clock, TaskScheduler, TimerHandle};
use streakline_domain::constants::{REMINDER_IN_PAST_MESSAGE, SHOW_NOTIFICATION_FAILED_MESSAGE};
use streakline_domain::{Habit, HabitId, Notification};
use tracing::{debug, info, instrument, warn};

use super::dispatch::Dispatcher;
use super::errors::ReminderError;
use super::gate::{NotificationGate, PermissionState};
use super::ports::{NotificationPlatform, ReminderLedger, UserFeedback};
use super::sweep::MissedSweep;

/// A reminder armed for a habit
#[derive(Debug, Clone)]
pub struct ScheduledReminder {
    pub habit_id: HabitId,
    pub handle: TimerHandle,
    pub fires_at: DateTime<Utc>,
}

/// Outcome of re-deriving reminders at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    /// Reminders armed
    pub scheduled: usize,
    /// Habits whose reminder time has already passed
    pub skipped_past: usize,
    /// Habits skipped because notifications are not granted
    pub skipped_permission: usize,
    /// Ledger entries from a previous process that were discarded
    pub stale_entries: usize,
}

/// Every armed reminder per habit, oldest first
type Registry = Arc<Mutex<HashMap<HabitId, Vec<ScheduledReminder>>>>;

/// Schedules habit reminders and the midnight missed-habit sweep
pub struct ReminderScheduler {
    gate: Arc<NotificationGate>,
    dispatcher: Dispatcher,
    feedback: Arc<dyn UserFeedback>,
    scheduler: Arc<dyn TaskScheduler>,
    clock: Arc<dyn Clock>,
    ledger: Option<Arc<dyn ReminderLedger>>,
    reminders: Registry,
    sweep: Mutex<Option<Arc<MissedSweep>>>,
}

impl ReminderScheduler {
    pub fn new(
        gate: Arc<NotificationGate>,
        platform: Arc<dyn NotificationPlatform>,
        feedback: Arc<dyn UserFeedback>,
        scheduler: Arc<dyn TaskScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gate,
            dispatcher: Dispatcher::new(platform, Arc::clone(&feedback)),
            feedback,
            scheduler,
            clock,
            ledger: None,
            reminders: Arc::default(),
            sweep: Mutex::new(None),
        }
    }

    /// Record armed handles in `ledger` for bookkeeping
    pub fn with_ledger(mut self, ledger: Arc<dyn ReminderLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn gate(&self) -> &Arc<NotificationGate> {
        &self.gate
    }

    /// Arm a one-shot reminder at `habit.reminder_time`.
    ///
    /// If notifications are not granted this asks for permission and
    /// returns [`ReminderError::Permission`]; the caller retries once the
    /// permission changes. A reminder time that is not strictly in the
    /// future is refused with [`ReminderError::Validation`].
    ///
    /// An earlier reminder for the same habit is not cancelled and both
    /// fire; use [`ReminderScheduler::reschedule`] for edits. Both stay in
    /// the registry, so `cancel_for_habit` and `shutdown` reach them.
    #[instrument(skip(self, habit), fields(habit_id = %habit.id))]
    pub async fn schedule_notification(&self, habit: &Habit) -> Result<ScheduledReminder, ReminderError> {
        let state = self.gate.refresh();
        if state != PermissionState::Granted {
            let answer = self.gate.request_permission().await;
            debug!(%state, %answer, "Reminder not scheduled, notifications were not granted");
            return Err(ReminderError::Permission(state));
        }

        let now = self.clock.now();
        let validation = || ReminderError::Validation { habit_id: habit.id, reminder_time: habit.reminder_time };
        if habit.reminder_time <= now {
            warn!(reminder_time = %habit.reminder_time, %now, "Reminder time is not in the future");
            self.feedback.warning(REMINDER_IN_PAST_MESSAGE);
            return Err(validation());
        }
        let delay = (habit.reminder_time - now).to_std().map_err(|_| validation())?;

        let handle = TimerHandle::new();
        let reminder = ScheduledReminder { habit_id: habit.id, handle: handle.clone(), fires_at: habit.reminder_time };

        let task = {
            let dispatcher = self.dispatcher.clone();
            let reminders = Arc::clone(&self.reminders);
            let notification = Notification::reminder(habit.id, &habit.name);
            let habit_id = habit.id;
            let handle_id = handle.id();
            Box::new(move || {
                dispatcher.show(&notification, SHOW_NOTIFICATION_FAILED_MESSAGE);
                let mut reminders = reminders.lock();
                if let Some(armed) = reminders.get_mut(&habit_id) {
                    armed.retain(|r| r.handle.id() != handle_id);
                    if armed.is_empty() {
                        reminders.remove(&habit_id);
                    }
                }
            })
        };
        self.scheduler.schedule_with(delay, handle.clone(), task);

        {
            let mut reminders = self.reminders.lock();
            let armed = reminders.entry(habit.id).or_default();
            armed.retain(|r| r.handle.is_pending());
            if !armed.is_empty() {
                warn!(pending = armed.len(), "Habit already had a pending reminder; all will fire unless cancelled");
            }
            armed.push(reminder.clone());
        }

        if let Some(ledger) = &self.ledger {
            if let Err(err) = ledger.record(habit.id, handle.id()).await {
                warn!(error = %err, "Failed to record reminder in ledger");
            }
        }

        info!(fires_at = %reminder.fires_at, delay_secs = delay.as_secs(), handle_id = %handle.id(), "Reminder scheduled");
        Ok(reminder)
    }

    /// Cancel an armed reminder. Cancelling a handle that already fired or
    /// was already cancelled does nothing.
    pub fn cancel_notification(&self, handle: &TimerHandle) -> bool {
        let cancelled = self.scheduler.cancel(handle);
        self.reminders.lock().retain(|_, armed| {
            armed.retain(|reminder| reminder.handle.id() != handle.id());
            !armed.is_empty()
        });
        if cancelled {
            debug!(handle_id = %handle.id(), "Reminder cancelled");
        }
        cancelled
    }

    /// Latest reminder armed for a habit that has not fired yet
    pub fn reminder_for(&self, habit_id: HabitId) -> Option<ScheduledReminder> {
        self.reminders
            .lock()
            .get(&habit_id)
            .and_then(|armed| armed.iter().rev().find(|r| r.handle.is_pending()).cloned())
    }

    /// Number of reminders still waiting to fire
    pub fn pending_reminders(&self) -> usize {
        self.reminders.lock().values().flatten().filter(|r| r.handle.is_pending()).count()
    }

    /// Cancel every reminder of a habit, e.g. when the habit is deleted.
    ///
    /// Returns whether any of them was still pending.
    pub async fn cancel_for_habit(&self, habit_id: HabitId) -> bool {
        let removed = self.reminders.lock().remove(&habit_id).unwrap_or_default();
        let cancelled =
            removed.iter().filter(|reminder| self.scheduler.cancel(&reminder.handle)).count() > 0;

        if let Some(ledger) = &self.ledger {
            if let Err(err) = ledger.remove(habit_id).await {
                warn!(%habit_id, error = %err, "Failed to remove reminder from ledger");
            }
        }

        debug!(%habit_id, cancelled, "Cancelled reminder for habit");
        cancelled
    }

    /// Replace a habit's reminder after its reminder time changed.
    pub async fn reschedule(&self, habit: &Habit) -> Result<ScheduledReminder, ReminderError> {
        self.cancel_for_habit(habit.id).await;
        self.schedule_notification(habit).await
    }

    /// Replace the midnight sweep with one over `habits`.
    ///
    /// The previous sweep is always cancelled. The new one is only armed
    /// while notifications are granted. At every local midnight it notifies
    /// each incomplete daily habit from this list, then re-arms itself.
    #[instrument(skip_all, fields(habits = habits.len()))]
    pub fn schedule_missed_habit_notifications(&self, habits: Vec<Habit>) -> Result<(), ReminderError> {
        let mut slot = self.sweep.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
            debug!("Previous missed-habit sweep cancelled");
        }

        let state = self.gate.state();
        if state != PermissionState::Granted {
            warn!(%state, "Missed-habit sweep not armed, notifications not granted");
            return Err(ReminderError::Permission(state));
        }

        *slot = Some(MissedSweep::start(
            habits,
            Arc::clone(&self.gate),
            self.dispatcher.clone(),
            Arc::clone(&self.scheduler),
            Arc::clone(&self.clock),
        ));
        info!("Missed-habit sweep scheduled");
        Ok(())
    }

    pub fn sweep_active(&self) -> bool {
        self.sweep.lock().as_ref().is_some_and(|sweep| sweep.is_active())
    }

    /// Times the current sweep has fired
    pub fn sweep_runs(&self) -> u64 {
        self.sweep.lock().as_ref().map_or(0, |sweep| sweep.runs())
    }

    /// Handle of the sweep's next firing
    pub fn sweep_handle(&self) -> Option<TimerHandle> {
        self.sweep.lock().as_ref().and_then(|sweep| sweep.armed_handle())
    }

    /// Re-derive reminders after a restart.
    ///
    /// Ledger entries left by a previous process refer to timers that no
    /// longer exist; they are dropped. Every habit whose reminder time is
    /// still ahead is then scheduled afresh.
    #[instrument(skip_all, fields(habits = habits.len()))]
    pub async fn restore_reminders(&self, habits: &[Habit]) -> RestoreReport {
        let mut report = RestoreReport::default();

        if let Some(ledger) = &self.ledger {
            match ledger.load().await {
                Ok(stale) => {
                    report.stale_entries = stale.len();
                    if let Err(err) = ledger.clear().await {
                        warn!(error = %err, "Failed to clear stale reminder ledger");
                    }
                }
                Err(err) => warn!(error = %err, "Failed to load reminder ledger"),
            }
        }

        let now = self.clock.now();
        for habit in habits {
            if habit.reminder_time <= now {
                report.skipped_past += 1;
                continue;
            }
            if !self.gate.is_granted() {
                report.skipped_permission += 1;
                continue;
            }

            match self.reschedule(habit).await {
                Ok(_) => report.scheduled += 1,
                Err(ReminderError::Validation { .. }) => report.skipped_past += 1,
                Err(ReminderError::Permission(_)) => report.skipped_permission += 1,
            }
        }

        info!(
            scheduled = report.scheduled,
            skipped_past = report.skipped_past,
            skipped_permission = report.skipped_permission,
            stale_entries = report.stale_entries,
            "Reminders restored"
        );
        report
    }

    /// Cancel the sweep and every pending reminder.
    pub fn shutdown(&self) -> usize {
        if let Some(sweep) = self.sweep.lock().take() {
            sweep.cancel();
        }

        let drained: Vec<_> = self.reminders.lock().drain().flat_map(|(_, armed)| armed).collect();
        let cancelled = drained.iter().filter(|reminder| self.scheduler.cancel(&reminder.handle)).count();

        info!(cancelled, "Reminder scheduler shut down");
        cancelled
    }
}
