//! Scratchpad note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnedRow, RowId};

/// The single free-text note a user keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RowId,
    pub user_id: String,
    #[serde(default)]
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRow for Note {
    fn id(&self) -> RowId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Serialize)]
pub struct NewNote<'a> {
    pub user_id: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NotePatch<'a> {
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}
