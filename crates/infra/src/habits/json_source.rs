//! Habit source backed by a JSON export of the habit API

use std::path::PathBuf;

use async_trait::async_trait;
use streakline_core::HabitSource;
use streakline_domain::{Habit, Result};
use tracing::{debug, instrument, warn};

use crate::errors::InfraError;

/// Reads the habit list from a JSON array on disk
///
/// The file holds the records exactly as the API returns them (camelCase
/// fields). Records that break the completion invariant are kept; analytics
/// skips them.
#[derive(Debug, Clone)]
pub struct JsonHabitSource {
    path: PathBuf,
}

impl JsonHabitSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HabitSource for JsonHabitSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_habits(&self) -> Result<Vec<Habit>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(InfraError::from)?;
        let habits: Vec<Habit> = serde_json::from_str(&contents).map_err(InfraError::from)?;

        for habit in &habits {
            if let Err(err) = habit.validate() {
                warn!(habit_id = %habit.id, error = %err, "Habit record is inconsistent");
            }
        }

        debug!(count = habits.len(), "Habits loaded");
        Ok(habits)
    }
}
