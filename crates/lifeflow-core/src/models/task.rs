//! Task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnedRow, RowId};

/// A todo list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RowId,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl OwnedRow for Task {
    fn id(&self) -> RowId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

/// Insert payload; `completed` and `created_at` come from column defaults.
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
}

/// Completion toggle. The owner column is never part of an update.
#[derive(Debug, Serialize)]
pub struct TaskPatch {
    pub completed: bool,
}
