//! Deterministic [`TaskScheduler`] for tests
//!
//! Deferred tasks wait in a queue until the test advances virtual time, so
//! reminder and sweep behaviour can be asserted without real delays.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use streakline_common::testing::ManualScheduler;
//! use streakline_common::time::TaskScheduler;
//!
//! let scheduler = ManualScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&fired);
//! scheduler.schedule(Duration::from_secs(30), Box::new(move || flag.store(true, Ordering::SeqCst)));
//!
//! scheduler.advance(Duration::from_secs(29));
//! assert!(!fired.load(Ordering::SeqCst));
//! scheduler.advance(Duration::from_secs(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::time::MockClock;
use crate::time::{DeferredTask, TaskScheduler, TimerHandle};

struct PendingTask {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: DeferredTask,
}

#[derive(Default)]
struct ManualState {
    elapsed: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler whose notion of time only moves on [`ManualScheduler::advance`].
///
/// When linked to a [`MockClock`], the clock is moved in lock-step so that
/// a task observes "now" equal to its own deadline while it runs.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
    clock: Option<MockClock>,
}

impl ManualScheduler {
    /// Create an unlinked scheduler starting at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler that advances `clock` as virtual time passes.
    pub fn with_clock(clock: MockClock) -> Self {
        Self { state: Arc::default(), clock: Some(clock) }
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        // Test utility: panic on poisoned mutex to fail tests early
        self.state.lock().expect("mutex poisoned").elapsed
    }

    /// Number of armed tasks that can still fire.
    pub fn pending(&self) -> usize {
        let state = self.state.lock().expect("mutex poisoned");
        state.pending.iter().filter(|task| task.handle.is_pending()).count()
    }

    /// Delay until the earliest armed task fires.
    pub fn next_due_in(&self) -> Option<Duration> {
        let state = self.state.lock().expect("mutex poisoned");
        state
            .pending
            .iter()
            .filter(|task| task.handle.is_pending())
            .map(|task| task.due.saturating_sub(state.elapsed))
            .min()
    }

    /// Move virtual time forward, running every task that falls due in
    /// deadline order. Tasks armed by a running task fire in the same call
    /// if their deadline is within the window.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.elapsed() + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut state = self.state.lock().expect("mutex poisoned");
                state.pending.retain(|task| !task.handle.is_cancelled());
                let position = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| (task.due, task.seq))
                    .map(|(index, _)| index);

                match position {
                    Some(index) => {
                        let task = state.pending.swap_remove(index);
                        let step = task.due.saturating_sub(state.elapsed);
                        state.elapsed = task.due.max(state.elapsed);
                        Some((task, step))
                    }
                    None => {
                        let step = target.saturating_sub(state.elapsed);
                        state.elapsed = target;
                        self.move_clock(step);
                        None
                    }
                }
            };

            let Some((pending, step)) = next else { break };
            self.move_clock(step);
            if pending.handle.begin_fire() {
                (pending.task)();
                ran += 1;
            }
        }

        ran
    }

    /// Advance straight to the next deadline and run what is due there.
    pub fn run_next(&self) -> usize {
        match self.next_due_in() {
            Some(delay) => self.advance(delay),
            None => 0,
        }
    }

    fn move_clock(&self, step: Duration) {
        if let Some(clock) = &self.clock {
            if !step.is_zero() {
                clock.advance(step);
            }
        }
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule_with(&self, delay: Duration, handle: TimerHandle, task: DeferredTask) {
        let mut state = self.state.lock().expect("mutex poisoned");
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.elapsed + delay;
        state.pending.push(PendingTask { due, seq, handle, task });
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for testing::scheduler.
    use std::sync::atomic::{AtomicU32, Ordering};

    use chrono::{NaiveDate, Offset, Utc};

    use super::*;
    use crate::testing::Clock;

    #[test]
    fn test_tasks_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, secs) in [("late", 20), ("early", 5), ("middle", 10)] {
            let order = Arc::clone(&order);
            scheduler.schedule(
                Duration::from_secs(secs),
                Box::new(move || order.lock().unwrap().push(label)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_secs(30)), 3);
        assert_eq!(*order.lock().unwrap(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_cancelled_task_is_dropped() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        let handle = scheduler.schedule(
            Duration::from_secs(1),
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
        );

        handle.cancel();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_linked_clock_reads_deadline_inside_task() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let clock = MockClock::at_local(start, Utc.fix());
        let scheduler = ManualScheduler::with_clock(clock.clone());
        let seen = Arc::new(Mutex::new(None));

        let observer = clock.clone();
        let slot = Arc::clone(&seen);
        scheduler.schedule(
            Duration::from_secs(90),
            Box::new(move || *slot.lock().unwrap() = Some(observer.local_now())),
        );

        scheduler.advance(Duration::from_secs(600));

        assert_eq!(*seen.lock().unwrap(), Some(start + chrono::Duration::seconds(90)));
        assert_eq!(clock.local_now(), start + chrono::Duration::seconds(600));
    }

    #[test]
    fn test_run_next_jumps_to_deadline() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_secs(3600), Box::new(|| {}));

        assert_eq!(scheduler.next_due_in(), Some(Duration::from_secs(3600)));
        assert_eq!(scheduler.run_next(), 1);
        assert_eq!(scheduler.elapsed(), Duration::from_secs(3600));
        assert_eq!(scheduler.run_next(), 0);
    }
}
