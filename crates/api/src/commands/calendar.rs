//! Month calendar command

use std::time::Instant;

use chrono::NaiveDate;
use streakline_domain::{MonthGrid, Result};
use tracing::error;

use crate::utils::{error_label, log_command_execution};
use crate::AppContext;

/// Month grid of completion days for the month containing `month`, or the
/// current local month when `None`.
///
/// # Errors
/// Fails when the habit list cannot be read.
pub async fn calendar(ctx: &AppContext, month: Option<NaiveDate>) -> Result<MonthGrid> {
    let command = "analytics::calendar";
    let start = Instant::now();

    let result =
        ctx.habits.fetch_habits().await.map(|habits| ctx.analytics.month_grid(&habits, month));

    if let Err(err) = &result {
        error!(command, error_type = error_label(err), error = %err, "failed to build calendar");
    }
    log_command_execution(command, start.elapsed(), result.is_ok());
    result
}
