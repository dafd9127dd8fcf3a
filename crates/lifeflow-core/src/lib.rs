//! lifeflow-core - Core library for LifeFlow
//!
//! This crate contains the Supabase data client, the session context, and the
//! per-feature stores shared by every LifeFlow front end.

pub mod auth;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod remote;
pub mod session;
pub mod storage;
pub mod util;

#[cfg(test)]
mod testing;

pub use error::{Error, Result, ValidationError};
pub use models::{Bookmark, Expense, Habit, HabitCompletion, Note, RowId, Task};
pub use session::{SessionContext, SessionState};
