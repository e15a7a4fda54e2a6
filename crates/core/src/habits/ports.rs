//! Port interfaces for habit retrieval
//!
//! Habits are owned by the storage collaborator; the core only ever reads
//! a snapshot of the list.

use async_trait::async_trait;
use streakline_domain::{Habit, Result};

/// Trait for fetching the user's habit list
#[async_trait]
pub trait HabitSource: Send + Sync {
    /// Fetch every habit, in the order the backend returns them
    async fn fetch_habits(&self) -> Result<Vec<Habit>>;
}
