//! Bookmark model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnedRow, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: RowId,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl OwnedRow for Bookmark {
    fn id(&self) -> RowId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Serialize)]
pub struct NewBookmark<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
}
