//! Reminder startup for the long-running `run` command

use std::time::Instant;

use serde::Serialize;
use streakline_core::{PermissionState, RestoreReport};
use streakline_domain::Result;
use tracing::{error, info, warn};

use crate::utils::{error_label, log_command_execution};
use crate::AppContext;

/// What `run` managed to arm at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub permission: PermissionState,
    pub restore: RestoreReport,
    pub sweep_armed: bool,
}

/// Ask for notification permission, re-derive every reminder from the
/// habit list and arm the midnight sweep when enabled.
///
/// Timers keep running on the context's scheduler after this returns;
/// call [`AppContext::shutdown`] to stop them.
///
/// # Errors
/// Fails when the habit list cannot be read. Permission problems are not
/// errors here; they show up in the summary.
pub async fn start_reminders(ctx: &AppContext) -> Result<RunSummary> {
    let command = "reminders::start";
    let start = Instant::now();

    let habits = match ctx.habits.fetch_habits().await {
        Ok(habits) => habits,
        Err(err) => {
            error!(command, error_type = error_label(&err), error = %err, "failed to load habits");
            log_command_execution(command, start.elapsed(), false);
            return Err(err);
        }
    };

    let permission = ctx.gate.request_permission().await;
    let restore = ctx.reminders.restore_reminders(&habits).await;

    let sweep_armed = if ctx.config.notifications.sweep_enabled {
        match ctx.reminders.schedule_missed_habit_notifications(habits) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "missed-habit sweep not armed");
                false
            }
        }
    } else {
        info!("missed-habit sweep disabled by configuration");
        false
    };

    log_command_execution(command, start.elapsed(), true);
    Ok(RunSummary { permission, restore, sweep_armed })
}
