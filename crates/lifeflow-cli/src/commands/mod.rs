pub mod auth_cmd;
pub mod bookmarks;
pub mod common;
pub mod completions;
pub mod countdown;
pub mod dashboard;
pub mod expenses;
pub mod habits;
pub mod notes;
pub mod pages;
pub mod profile;
pub mod tasks;
pub mod timer;
