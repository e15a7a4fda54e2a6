//! Habit records as delivered by the habit API
//!
//! Habits are created and mutated by the storage collaborator. The analytics
//! and reminder code only reads them; the one mutation offered here is the
//! completion toggle, which keeps `completed` and `completed_at` in step.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CATEGORY;
use crate::errors::{Result, StreaklineError};
use crate::impl_domain_enum_conversions;

/// Stable habit identifier assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit is meant to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Daily,
    Weekly,
    Custom,
}

impl_domain_enum_conversions!(Recurrence {
    Daily => "daily",
    Weekly => "weekly",
    Custom => "custom",
});

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A tracked habit
///
/// `completed_at` is local wall-clock time. It must be `Some` exactly when
/// `completed` is true; records that break this are excluded from analytics
/// (see [`Habit::completion`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub reminder_time: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl Habit {
    /// New, not yet completed habit with backend defaults
    pub fn new(id: HabitId, name: impl Into<String>, reminder_time: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            note: None,
            reminder_time,
            recurrence: Recurrence::default(),
            category: default_category(),
            completed: false,
            completed_at: None,
        }
    }

    /// Toggle completion, setting or clearing the timestamp accordingly
    pub fn set_completed(&mut self, completed: bool, at: NaiveDateTime) {
        self.completed = completed;
        self.completed_at = completed.then_some(at);
    }

    /// Completion timestamp of a well-formed completed habit
    ///
    /// Returns `None` for incomplete habits and for completed habits that
    /// are missing their timestamp.
    pub fn completion(&self) -> Option<NaiveDateTime> {
        if self.completed {
            self.completed_at
        } else {
            None
        }
    }

    /// Daily habit still waiting to be done (missed-sweep candidate)
    pub fn is_pending_daily(&self) -> bool {
        self.recurrence == Recurrence::Daily && !self.completed
    }

    /// Check the record invariants
    ///
    /// # Errors
    /// Returns `StreaklineError::InvalidInput` when the name is blank or
    /// `completed_at` disagrees with `completed`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StreaklineError::InvalidInput(format!("habit {} has an empty name", self.id)));
        }

        match (self.completed, self.completed_at.is_some()) {
            (true, false) => Err(StreaklineError::InvalidInput(format!(
                "habit {} is completed but has no completion time",
                self.id
            ))),
            (false, true) => Err(StreaklineError::InvalidInput(format!(
                "habit {} is not completed but has a completion time",
                self.id
            ))),
            _ => Ok(()),
        }
    }
}

/// Split habits into `(pending, completed)` preserving order
pub fn partition_by_status(habits: &[Habit]) -> (Vec<&Habit>, Vec<&Habit>) {
    habits.iter().partition(|habit| !habit.completed)
}
