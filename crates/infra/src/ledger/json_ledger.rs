//! JSON file reminder ledger
//!
//! Keeps the habit -> timer handle mapping on disk. Handles do not survive a
//! restart, so the file is only ever used to clean up after the previous
//! process.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use streakline_core::ReminderLedger;
use streakline_domain::{HabitId, Result};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::errors::InfraError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntry {
    habit_id: HabitId,
    handle_id: Uuid,
    recorded_at: DateTime<Utc>,
}

/// Reminder ledger stored as a JSON array
pub struct JsonReminderLedger {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonReminderLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    async fn read(&self) -> Result<Vec<LedgerEntry>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents).map_err(InfraError::from)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    async fn write(&self, entries: &[LedgerEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        let json = serde_json::to_vec_pretty(entries).map_err(InfraError::from)?;
        tokio::fs::write(&self.path, json).await.map_err(InfraError::from)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Reminder ledger written");
        Ok(())
    }
}

#[async_trait]
impl ReminderLedger for JsonReminderLedger {
    async fn load(&self) -> Result<HashMap<HabitId, Uuid>> {
        let _guard = self.lock.lock().await;
        let entries = self.read().await?;
        Ok(entries.into_iter().map(|entry| (entry.habit_id, entry.handle_id)).collect())
    }

    async fn record(&self, habit_id: HabitId, handle_id: Uuid) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.retain(|entry| entry.habit_id != habit_id);
        entries.push(LedgerEntry { habit_id, handle_id, recorded_at: Utc::now() });
        self.write(&entries).await
    }

    async fn remove(&self, habit_id: HabitId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        let before = entries.len();
        entries.retain(|entry| entry.habit_id != habit_id);
        if entries.len() == before {
            return Ok(());
        }
        self.write(&entries).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(&[]).await
    }
}
