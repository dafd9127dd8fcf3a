//! Feature stores, one per page.
//!
//! The scoped CRUD stores (tasks, expenses, habits, notes, bookmarks) each
//! own a local mirror of the signed-in user's rows and only change it after
//! the remote write is confirmed. Countdown and the study timer never touch
//! the network.

mod mirror;

pub mod bookmarks;
pub mod countdown;
pub mod dashboard;
pub mod expenses;
pub mod habits;
pub mod notes;
pub mod profile;
pub mod tasks;
pub mod timer;

pub use bookmarks::BookmarkShelf;
pub use countdown::{Countdown, Remaining};
pub use dashboard::{greeting, DashboardSummary};
pub use expenses::ExpenseLedger;
pub use habits::{HabitBoard, HabitProgress};
pub use mirror::ScopedMirror;
pub use notes::Scratchpad;
pub use profile::Profile;
pub use tasks::TaskList;
pub use timer::{Notifier, StudyTimer, TimerEvent};
