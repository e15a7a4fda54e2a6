//! Streakline - habit streaks and reminders
//!
//! Main entry point for the command-line application.

use anyhow::{Context, Result};
use serde::Serialize;
use streakline_app::commands::{calendar, dashboard, start_reminders};
use streakline_app::utils::init_tracing;
use streakline_app::{build_cli, AppContext, Invocation};
use tracing::{debug, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let invocation =
        Invocation::from_matches(&matches).context("no command given, see --help")?;

    // Load .env before the config loader reads the environment
    let dotenv = dotenvy::dotenv();

    let config = streakline_infra::config::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let ctx = AppContext::new(config)?;

    match invocation {
        Invocation::Dashboard => print_json(&dashboard(&ctx).await?)?,
        Invocation::Calendar(month) => print_json(&calendar(&ctx, month).await?)?,
        Invocation::Run => {
            print_json(&start_reminders(&ctx).await?)?;
            info!("Streakline running, press Ctrl-C to stop");

            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
            }
            ctx.shutdown();
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
