//! Journal goals: dated, titled intentions the trader ticks off once
//! achieved ("no trading after two losses", "journal every trade").
//!
//! These are separate from the weekly/monthly profit targets in
//! [`crate::goals`].

use crate::domain::GoalId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalBoardError {
    #[error("goal {0} already exists")]
    DuplicateId(GoalId),

    #[error("goal {0} not found")]
    NotFound(GoalId),

    #[error("goal title must not be empty")]
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    pub id: GoalId,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub achieved: bool,
}

impl GoalEntry {
    /// A pending goal. The title is trimmed.
    pub fn new(id: u64, date: NaiveDate, title: &str) -> Self {
        Self {
            id: GoalId(id),
            date,
            title: title.trim().to_string(),
            achieved: false,
        }
    }
}

/// Journal goals in insertion order. Serializes as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GoalBoard {
    entries: Vec<GoalEntry>,
}

impl GoalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from stored entries. Ids must be unique and titles
    /// non-empty.
    pub fn from_entries(entries: Vec<GoalEntry>) -> Result<Self, GoalBoardError> {
        let mut board = Self::new();
        for entry in entries {
            board.add(entry)?;
        }
        Ok(board)
    }

    pub fn add(&mut self, mut entry: GoalEntry) -> Result<(), GoalBoardError> {
        entry.title = entry.title.trim().to_string();
        if entry.title.is_empty() {
            return Err(GoalBoardError::EmptyTitle);
        }
        if self.get(entry.id).is_some() {
            return Err(GoalBoardError::DuplicateId(entry.id));
        }
        tracing::debug!(id = %entry.id, date = %entry.date, "goal added");
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, id: GoalId) -> Result<GoalEntry, GoalBoardError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(GoalBoardError::NotFound(id))?;
        tracing::debug!(id = %id, "goal deleted");
        Ok(self.entries.remove(idx))
    }

    /// Mark a goal achieved or pending again.
    pub fn set_achieved(&mut self, id: GoalId, achieved: bool) -> Result<(), GoalBoardError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(GoalBoardError::NotFound(id))?;
        entry.achieved = achieved;
        tracing::debug!(id = %id, achieved, "goal updated");
        Ok(())
    }

    /// Flip the achieved flag and return the new value.
    pub fn toggle(&mut self, id: GoalId) -> Result<bool, GoalBoardError> {
        let achieved = !self.get(id).ok_or(GoalBoardError::NotFound(id))?.achieved;
        self.set_achieved(id, achieved)?;
        Ok(achieved)
    }

    pub fn get(&self, id: GoalId) -> Option<&GoalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[GoalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open goals, newest date first.
    pub fn pending(&self) -> Vec<&GoalEntry> {
        self.newest_first(false)
    }

    /// Achieved goals, newest date first.
    pub fn achieved(&self) -> Vec<&GoalEntry> {
        self.newest_first(true)
    }

    fn newest_first(&self, achieved: bool) -> Vec<&GoalEntry> {
        let mut out: Vec<&GoalEntry> =
            self.entries.iter().filter(|e| e.achieved == achieved).collect();
        // stable: same-day goals keep insertion order
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}
