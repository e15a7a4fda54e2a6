//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use streakline_common::{Clock, SystemClock, TaskScheduler, TokioTaskScheduler};
use streakline_core::{
    AnalyticsService, HabitSource, NotificationGate, NotificationPlatform, ReminderScheduler,
    UserFeedback,
};
use streakline_domain::{Config, Result, StreaklineError};
use streakline_infra::{JsonHabitSource, JsonReminderLedger, TerminalPlatform, TracingFeedback};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub habits: Arc<dyn HabitSource>,
    pub gate: Arc<NotificationGate>,
    pub reminders: Arc<ReminderScheduler>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppContext {
    /// Wire the production adapters: system clock, tokio timers and the
    /// terminal notification platform.
    ///
    /// # Errors
    /// Returns `StreaklineError::Internal` when called outside a tokio
    /// runtime.
    pub fn new(config: Config) -> Result<Self> {
        let scheduler = TokioTaskScheduler::current().map_err(|err| {
            tracing::error!(error = %err, "failed to construct task scheduler");
            StreaklineError::Internal(format!("failed to construct task scheduler: {err}"))
        })?;
        let platform = Arc::new(TerminalPlatform::new(&config.notifications));

        Ok(Self::with_services(config, Arc::new(SystemClock), Arc::new(scheduler), platform))
    }

    /// Wire the file-backed adapters around caller-supplied time and
    /// notification services.
    pub fn with_services(
        config: Config,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn TaskScheduler>,
        platform: Arc<dyn NotificationPlatform>,
    ) -> Self {
        let feedback: Arc<dyn UserFeedback> = Arc::new(TracingFeedback);
        let habits: Arc<dyn HabitSource> =
            Arc::new(JsonHabitSource::new(PathBuf::from(&config.habits.path)));
        let ledger = Arc::new(JsonReminderLedger::new(PathBuf::from(&config.ledger.path)));

        let gate = Arc::new(NotificationGate::new(Arc::clone(&platform), Arc::clone(&feedback)));
        let reminders = Arc::new(
            ReminderScheduler::new(
                Arc::clone(&gate),
                platform,
                feedback,
                scheduler,
                Arc::clone(&clock),
            )
            .with_ledger(ledger),
        );
        let analytics = Arc::new(AnalyticsService::new(Arc::clone(&clock)));

        info!(
            habits_path = %config.habits.path,
            ledger_path = %config.ledger.path,
            permission = %gate.state(),
            "application context ready"
        );

        Self { config, clock, habits, gate, reminders, analytics }
    }

    /// Cancel every pending reminder and the midnight sweep.
    ///
    /// Returns the number of reminders that were still pending.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.reminders.shutdown();
        info!(cancelled, "application context shut down");
        cancelled
    }
}
