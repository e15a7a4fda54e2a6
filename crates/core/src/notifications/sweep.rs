//! Recurring midnight sweep for missed daily habits
//!
//! The sweep owns one cancellation token. Every arming links a fresh timer
//! handle to a child of that token, so cancelling the sweep stops the armed
//! timer and any re-arm that would follow it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use streakline_common::{Clock, TaskScheduler, TimerHandle};
use streakline_domain::constants::SHOW_MISSED_NOTIFICATION_FAILED_MESSAGE;
use streakline_domain::{Habit, Notification};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dispatch::Dispatcher;
use super::gate::{NotificationGate, PermissionState};
use crate::analytics::bucketing::delay_until_next_midnight;

pub(crate) struct MissedSweep {
    habits: Vec<Habit>,
    token: CancellationToken,
    gate: Arc<NotificationGate>,
    dispatcher: Dispatcher,
    scheduler: Arc<dyn TaskScheduler>,
    clock: Arc<dyn Clock>,
    armed: Mutex<Option<TimerHandle>>,
    runs: AtomicU64,
}

impl MissedSweep {
    /// Build a sweep over `habits` and arm it for the next local midnight.
    pub(crate) fn start(
        habits: Vec<Habit>,
        gate: Arc<NotificationGate>,
        dispatcher: Dispatcher,
        scheduler: Arc<dyn TaskScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Arc<Self> {
        let sweep = Arc::new(Self {
            habits,
            token: CancellationToken::new(),
            gate,
            dispatcher,
            scheduler,
            clock,
            armed: Mutex::new(None),
            runs: AtomicU64::new(0),
        });
        sweep.arm();
        sweep
    }

    /// Stop the sweep for good. Returns `false` if it was already stopped.
    pub(crate) fn cancel(&self) -> bool {
        let was_active = self.is_active();
        self.token.cancel();
        was_active
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub(crate) fn runs(&self) -> u64 {
        self.runs.load(Ordering::SeqCst)
    }

    pub(crate) fn armed_handle(&self) -> Option<TimerHandle> {
        self.armed.lock().clone()
    }

    fn arm(self: &Arc<Self>) {
        if !self.is_active() {
            return;
        }

        let delay = delay_until_next_midnight(self.clock.as_ref());
        let handle = TimerHandle::linked(self.token.child_token());
        *self.armed.lock() = Some(handle.clone());

        let sweep = Arc::clone(self);
        self.scheduler.schedule_with(delay, handle, Box::new(move || sweep.fire()));
        debug!(delay_secs = delay.as_secs(), habits = self.habits.len(), "Missed-habit sweep armed");
    }

    fn fire(self: Arc<Self>) {
        self.runs.fetch_add(1, Ordering::SeqCst);

        if self.gate.refresh() == PermissionState::Granted {
            let mut shown = 0usize;
            let mut failed = 0usize;
            for habit in self.habits.iter().filter(|habit| habit.is_pending_daily()) {
                let notification = Notification::missed(habit.id, &habit.name);
                if self.dispatcher.show(&notification, SHOW_MISSED_NOTIFICATION_FAILED_MESSAGE) {
                    shown += 1;
                } else {
                    failed += 1;
                }
            }
            info!(shown, failed, "Missed-habit sweep ran");
        } else {
            warn!(state = %self.gate.state(), "Missed-habit sweep skipped, notifications not granted");
        }

        self.arm();
    }
}
