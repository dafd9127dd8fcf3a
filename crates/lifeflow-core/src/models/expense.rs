//! Expense model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnedRow, RowId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RowId,
    pub user_id: String,
    pub item_name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl OwnedRow for Expense {
    fn id(&self) -> RowId {
        self.id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Serialize)]
pub struct NewExpense<'a> {
    pub user_id: &'a str,
    pub item_name: &'a str,
    pub price: f64,
}
