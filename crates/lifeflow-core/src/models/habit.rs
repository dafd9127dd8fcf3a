//! Habit model
//!
//! Habits are a fixed set; the remote table only stores per-day completion
//! rows, one per (owner, habit, date).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{OwnedRow, RowId};
use crate::error::ValidationError;

/// A tracked daily habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Habit {
    Study,
    Water,
    Exercise,
}

impl Habit {
    pub const ALL: [Self; 3] = [Self::Study, Self::Water, Self::Exercise];

    /// Value stored in the `habit_name` column.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Water => "Water",
            Self::Exercise => "Exercise",
        }
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Habit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|habit| habit.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownHabit(trimmed.to_string()))
    }
}

/// One habit's completion state for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: RowId,
    pub user_id: String,
    pub habit_name: String,
    #[serde(default)]
    pub completed: bool,
    pub date: NaiveDate,
}

impl OwnedRow for HabitCompletion {
    fn id(&self) -> RowId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Serialize)]
pub struct NewHabitCompletion<'a> {
    pub user_id: &'a str,
    pub habit_name: &'a str,
    pub completed: bool,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct HabitPatch {
    pub completed: bool,
}
