//! Dashboard: greeting plus a count of what the user has stored.

use chrono::{NaiveDate, Timelike};

use crate::auth::AuthUser;
use crate::error::Result;
use crate::remote::RowStore;

use super::{BookmarkShelf, ExpenseLedger, HabitBoard, TaskList};

/// Greeting for a local hour of day (0-23).
pub const fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// e.g. "Good evening, student!" for `student@example.com`.
pub fn headline(user: &AuthUser, now: impl Timelike) -> String {
    let name = user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("there");
    format!("{}, {name}!", greeting(now.hour()))
}

/// e.g. "Monday, October 19, 2026".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub task_count: usize,
    pub tasks_completed: usize,
    pub expense_total: f64,
    pub habits_done_today: usize,
    pub habit_count: usize,
    pub bookmark_count: usize,
}

impl DashboardSummary {
    /// Read every owner-scoped table once.
    pub async fn load<R: RowStore + Clone>(
        store: &R,
        user: &AuthUser,
        today: NaiveDate,
    ) -> Result<Self> {
        let mut tasks = TaskList::new(store.clone(), user);
        tasks.fetch().await?;
        let mut expenses = ExpenseLedger::new(store.clone(), user);
        expenses.fetch().await?;
        let mut habits = HabitBoard::new(store.clone(), user, today);
        habits.fetch().await?;
        let mut bookmarks = BookmarkShelf::new(store.clone(), user);
        let bookmark_count = bookmarks.fetch().await?.len();

        let progress = habits.progress();
        Ok(Self {
            task_count: tasks.tasks().len(),
            tasks_completed: tasks.completed_count(),
            expense_total: expenses.total(),
            habits_done_today: progress.completed,
            habit_count: progress.total,
            bookmark_count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.task_count == 0
            && self.expense_total.abs() < f64::EPSILON
            && self.habits_done_today == 0
            && self.bookmark_count == 0
    }
}
