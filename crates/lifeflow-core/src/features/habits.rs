//! Daily habit check-offs for the fixed habit set.

use chrono::NaiveDate;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{Habit, HabitCompletion, HabitPatch, NewHabitCompletion};
use crate::remote::{Query, RowStore, Table};

use super::ScopedMirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitProgress {
    pub completed: usize,
    pub total: usize,
}

impl HabitProgress {
    /// Whole percentage, rounded down.
    pub const fn percent(self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}

/// Today's completion rows for one user.
pub struct HabitBoard<R> {
    mirror: ScopedMirror<R, HabitCompletion>,
    today: NaiveDate,
}

impl<R: RowStore> HabitBoard<R> {
    pub fn new(store: R, user: &AuthUser, today: NaiveDate) -> Self {
        Self {
            mirror: ScopedMirror::new(store, Table::Habits, user.id.clone()),
            today,
        }
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn completions(&self) -> &[HabitCompletion] {
        self.mirror.rows()
    }

    pub async fn fetch(&mut self) -> Result<&[HabitCompletion]> {
        let query = self.today_query();
        self.mirror.fetch(&query).await
    }

    pub fn is_completed(&self, habit: Habit) -> bool {
        self.row_for(habit).is_some_and(|row| row.completed)
    }

    /// Flip today's state for `habit` once the store confirms it.
    ///
    /// The current row is read from the store rather than the mirror: an
    /// existing row is patched to the opposite state, a missing one is
    /// inserted as completed.
    pub async fn toggle(&mut self, habit: Habit) -> Result<bool> {
        let query = self.today_query().eq("habit_name", habit.name()).limit(1);
        let existing = self
            .mirror
            .store()
            .select::<HabitCompletion>(Table::Habits, &query)
            .await?
            .into_iter()
            .next();

        let row = match existing {
            Some(row) => {
                self.mirror
                    .update(
                        row.id,
                        &HabitPatch {
                            completed: !row.completed,
                        },
                    )
                    .await?
            }
            None => {
                let owner = self.mirror.owner().to_owned();
                self.mirror
                    .create(&NewHabitCompletion {
                        user_id: &owner,
                        habit_name: habit.name(),
                        completed: true,
                        date: self.today,
                    })
                    .await?
            }
        };
        tracing::debug!(habit = %habit, completed = row.completed, "Toggled habit");
        Ok(row.completed)
    }

    pub fn progress(&self) -> HabitProgress {
        HabitProgress {
            completed: Habit::ALL
                .into_iter()
                .filter(|habit| self.is_completed(*habit))
                .count(),
            total: Habit::ALL.len(),
        }
    }

    fn row_for(&self, habit: Habit) -> Option<&HabitCompletion> {
        self.completions()
            .iter()
            .find(|row| row.habit_name == habit.name() && row.date == self.today)
    }

    fn today_query(&self) -> Query {
        self.mirror.scoped_query().eq("date", self.today)
    }
}
