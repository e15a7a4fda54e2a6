//! One-shot deferred tasks with cancellation support
//!
//! [`TaskScheduler`] is the "run this later" primitive the reminder service
//! is written against. [`TokioTaskScheduler`] backs it with the tokio timer
//! wheel in production; tests use
//! [`ManualScheduler`](crate::testing::ManualScheduler) instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Work executed when a deferred task fires.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// A handle that can be used to cancel a deferred task
///
/// Handles are cheap to clone; every clone refers to the same task.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: Uuid,
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Create a handle with its own cancellation token.
    pub fn new() -> Self {
        Self::linked(CancellationToken::new())
    }

    /// Create a handle driven by `token`. Cancelling the token (or any of
    /// its parents) cancels the task.
    pub fn linked(token: CancellationToken) -> Self {
        Self { id: Uuid::now_v7(), token, fired: Arc::new(AtomicBool::new(false)) }
    }

    /// Stable identifier, suitable for bookkeeping outside the process.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Cancel the task.
    ///
    /// Returns `true` only if the task was still pending. Cancelling a task
    /// that already fired or was already cancelled has no effect.
    pub fn cancel(&self) -> bool {
        let was_pending = self.is_pending();
        self.token.cancel();
        was_pending
    }

    /// Check if the task has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Check if the task already ran.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Neither fired nor cancelled.
    pub fn is_pending(&self) -> bool {
        !self.has_fired() && !self.is_cancelled()
    }

    /// Token observed by the executor while the task waits.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Claim the right to run the task. Executors call this when the delay
    /// elapses; it returns `false` if the task was cancelled or has already
    /// been claimed.
    pub fn begin_fire(&self) -> bool {
        if self.is_cancelled() {
            return false;
        }
        !self.fired.swap(true, Ordering::SeqCst)
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire-at-a-future-instant scheduling primitive.
pub trait TaskScheduler: Send + Sync {
    /// Arm `task` to run once after `delay`, controlled by `handle`.
    ///
    /// The task is dropped without running if the handle is cancelled
    /// before the delay elapses.
    fn schedule_with(&self, delay: Duration, handle: TimerHandle, task: DeferredTask);

    /// Arm `task` with a fresh handle and return it.
    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle {
        let handle = TimerHandle::new();
        self.schedule_with(delay, handle.clone(), task);
        handle
    }

    /// Cancel a previously armed task. Idempotent.
    fn cancel(&self, handle: &TimerHandle) -> bool {
        handle.cancel()
    }
}

/// Errors raised while setting up a scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// No tokio runtime is available on the calling thread.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

#[cfg(feature = "runtime")]
pub use self::tokio_backend::TokioTaskScheduler;

#[cfg(feature = "runtime")]
mod tokio_backend {
    use std::time::Duration;

    use tokio::runtime::Handle;
    use tokio::time::sleep;
    use tracing::trace;

    use super::{DeferredTask, SchedulerError, TaskScheduler, TimerHandle};

    /// [`TaskScheduler`] backed by tokio timers.
    ///
    /// Every armed task is a spawned future that races the delay against
    /// the handle's cancellation token, so a cancelled task releases its
    /// resources immediately rather than at its deadline.
    #[derive(Debug, Clone)]
    pub struct TokioTaskScheduler {
        runtime: Handle,
    }

    impl TokioTaskScheduler {
        /// Spawn tasks onto `runtime`.
        pub fn new(runtime: Handle) -> Self {
            Self { runtime }
        }

        /// Spawn tasks onto the runtime driving the current thread.
        ///
        /// # Errors
        /// Returns [`SchedulerError::NoRuntime`] outside a tokio context.
        pub fn current() -> Result<Self, SchedulerError> {
            Handle::try_current()
                .map(Self::new)
                .map_err(|err| SchedulerError::NoRuntime(err.to_string()))
        }
    }

    impl TaskScheduler for TokioTaskScheduler {
        fn schedule_with(&self, delay: Duration, handle: TimerHandle, task: DeferredTask) {
            let token = handle.token().clone();
            self.runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        trace!(timer_id = %handle.id(), "deferred task cancelled");
                    }
                    _ = sleep(delay) => {
                        if handle.begin_fire() {
                            task();
                        }
                    }
                }
            });
        }
    }
}
