//! Dashboard command

use std::time::Instant;

use streakline_domain::{DashboardSnapshot, Result};
use tracing::error;

use crate::utils::{error_label, log_command_execution};
use crate::AppContext;

/// Load the habit list and compute the dashboard snapshot.
///
/// # Errors
/// Fails when the habit list cannot be read.
pub async fn dashboard(ctx: &AppContext) -> Result<DashboardSnapshot> {
    let command = "analytics::dashboard";
    let start = Instant::now();

    let result = ctx.habits.fetch_habits().await.map(|habits| ctx.analytics.snapshot(&habits));

    if let Err(err) = &result {
        error!(command, error_type = error_label(err), error = %err, "failed to build dashboard");
    }
    log_command_execution(command, start.elapsed(), result.is_ok());
    result
}
