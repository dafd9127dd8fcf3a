//! Data models for LifeFlow
//!
//! Every remote row is keyed by a server-generated [`RowId`] and carries the
//! owning user's id in its `user_id` column.

mod bookmark;
mod expense;
mod habit;
mod note;
mod row;
mod task;

pub use bookmark::{Bookmark, NewBookmark};
pub use expense::{Expense, NewExpense};
pub use habit::{Habit, HabitCompletion, HabitPatch, NewHabitCompletion};
pub use note::{NewNote, Note, NotePatch};
pub use row::{OwnedRow, RowId};
pub use task::{NewTask, Task, TaskPatch};
