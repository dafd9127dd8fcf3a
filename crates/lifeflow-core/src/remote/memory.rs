//! In-memory [`RowStore`] for tests and offline demos.
//!
//! Mirrors the service behavior LifeFlow relies on: generated ids and
//! timestamps, column defaults, equality filters, ordering, limits, and the
//! uniqueness constraints from `supabase/schema.sql`. Every call is recorded so
//! callers can assert that validation failures never reach the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Query, RemoteError, RemoteResult, RowStore, Table};
use crate::models::RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedCall {
    operation: Operation,
    table: Table,
}

#[derive(Debug)]
struct StoredRow {
    seq: u64,
    columns: Map<String, Value>,
}

#[derive(Debug, Default)]
struct MemoryTables {
    rows: HashMap<Table, Vec<StoredRow>>,
    next_seq: u64,
    calls: Vec<RecordedCall>,
    pending_failures: Vec<Operation>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRowStore {
    inner: Arc<Mutex<MemoryTables>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call of `operation` fail with a service error.
    pub fn fail_next(&self, operation: Operation) {
        self.lock().pending_failures.push(operation);
    }

    pub fn call_count(&self, operation: Operation, table: Table) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation == operation && call.table == table)
            .count()
    }

    /// Raw rows of a table, oldest first.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.lock()
            .rows
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .map(|row| Value::Object(row.columns.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Insert a row directly, bypassing call recording and failure injection.
    pub fn seed<B: Serialize>(&self, table: Table, row: &B) -> RemoteResult<Value> {
        let columns = to_columns(row)?;
        let mut tables = self.lock();
        tables.insert_row(table, columns).map(Value::Object)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryTables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, operation: Operation, table: Table) -> RemoteResult<MutexGuard<'_, MemoryTables>> {
        let mut tables = self.lock();
        tables.calls.push(RecordedCall { operation, table });
        if let Some(position) = tables
            .pending_failures
            .iter()
            .position(|pending| *pending == operation)
        {
            tables.pending_failures.remove(position);
            return Err(RemoteError::Api {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(tables)
    }
}

impl MemoryTables {
    fn insert_row(
        &mut self,
        table: Table,
        mut columns: Map<String, Value>,
    ) -> RemoteResult<Map<String, Value>> {
        apply_column_defaults(table, &mut columns);

        let unique = unique_columns(table);
        let rows = self.rows.entry(table).or_default();
        if !unique.is_empty()
            && rows.iter().any(|row| {
                unique
                    .iter()
                    .all(|column| row.columns.get(*column) == columns.get(*column))
            })
        {
            return Err(RemoteError::Api {
                status: 409,
                message: format!(
                    "duplicate key value violates unique constraint on {}",
                    table.as_str()
                ),
            });
        }

        self.next_seq += 1;
        rows.push(StoredRow {
            seq: self.next_seq,
            columns: columns.clone(),
        });
        Ok(columns)
    }

    fn matching_mut<'a>(
        &'a mut self,
        table: Table,
        query: &'a Query,
    ) -> impl Iterator<Item = &'a mut StoredRow> + 'a {
        self.rows
            .entry(table)
            .or_default()
            .iter_mut()
            .filter(move |row| matches_filters(&row.columns, query))
    }
}

impl RowStore for MemoryRowStore {
    async fn select<T: DeserializeOwned>(&self, table: Table, query: &Query) -> RemoteResult<Vec<T>> {
        let tables = self.begin(Operation::Select, table)?;
        let mut matching = tables
            .rows
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filters(&row.columns, query))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if let Some(order) = query.ordering() {
            matching.sort_by(|left, right| {
                let ordering = column_text(&left.columns, &order.column)
                    .cmp(&column_text(&right.columns, &order.column))
                    .then(left.seq.cmp(&right.seq));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        if let Some(limit) = query.max_rows() {
            matching.truncate(limit);
        }

        matching
            .into_iter()
            .map(|row| {
                serde_json::from_value(Value::Object(row.columns.clone())).map_err(RemoteError::from)
            })
            .collect()
    }

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &B,
    ) -> RemoteResult<T> {
        let columns = to_columns(row)?;
        let mut tables = self.begin(Operation::Insert, table)?;
        let stored = tables.insert_row(table, columns)?;
        Ok(serde_json::from_value(Value::Object(stored))?)
    }

    async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        filter: &Query,
        patch: &B,
    ) -> RemoteResult<Vec<T>> {
        let patch = to_columns(patch)?;
        let mut tables = self.begin(Operation::Update, table)?;
        let mut updated = Vec::new();
        for row in tables.matching_mut(table, filter) {
            for (column, value) in &patch {
                row.columns.insert(column.clone(), value.clone());
            }
            updated.push(Value::Object(row.columns.clone()));
        }

        updated
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(RemoteError::from))
            .collect()
    }

    async fn delete(&self, table: Table, filter: &Query) -> RemoteResult<()> {
        let mut tables = self.begin(Operation::Delete, table)?;
        if let Some(rows) = tables.rows.get_mut(&table) {
            rows.retain(|row| !matches_filters(&row.columns, filter));
        }
        Ok(())
    }
}

fn to_columns<B: Serialize>(row: &B) -> RemoteResult<Map<String, Value>> {
    match serde_json::to_value(row)? {
        Value::Object(columns) => Ok(columns),
        _ => Err(RemoteError::Api {
            status: 400,
            message: "Row payload must be a JSON object".to_string(),
        }),
    }
}

fn apply_column_defaults(table: Table, columns: &mut Map<String, Value>) {
    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
    columns
        .entry("id")
        .or_insert_with(|| Value::String(RowId::new().to_string()));

    match table {
        Table::Tasks | Table::Habits => {
            columns.entry("completed").or_insert(Value::Bool(false));
            columns.entry("created_at").or_insert(now);
        }
        Table::Notes => {
            columns.entry("content").or_insert(Value::String(String::new()));
            columns.entry("created_at").or_insert(now.clone());
            columns.entry("updated_at").or_insert(now);
        }
        Table::Expenses | Table::Bookmarks => {
            columns.entry("created_at").or_insert(now);
        }
    }
}

/// Mirrors the unique constraints declared in `supabase/schema.sql`.
const fn unique_columns(table: Table) -> &'static [&'static str] {
    match table {
        Table::Habits => &["user_id", "habit_name", "date"],
        Table::Notes => &["user_id"],
        Table::Tasks | Table::Expenses | Table::Bookmarks => &[],
    }
}

fn matches_filters(columns: &Map<String, Value>, query: &Query) -> bool {
    query
        .filters()
        .iter()
        .all(|(column, expected)| column_text(columns, column).as_deref() == Some(expected.as_str()))
}

fn column_text(columns: &Map<String, Value>, column: &str) -> Option<String> {
    match columns.get(column)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn select_filters_orders_and_limits() {
        let store = MemoryRowStore::new();
        store
            .seed(Table::Tasks, &json!({"user_id": "a", "title": "first"}))
            .unwrap();
        store
            .seed(Table::Tasks, &json!({"user_id": "b", "title": "other"}))
            .unwrap();
        store
            .seed(Table::Tasks, &json!({"user_id": "a", "title": "second"}))
            .unwrap();

        let rows: Vec<Value> = store
            .select(
                Table::Tasks,
                &Query::owned_by("a").order_desc("created_at").limit(5),
            )
            .await
            .unwrap();
        let titles = rows
            .iter()
            .map(|row| row["title"].as_str().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn unique_constraint_rejects_second_habit_row_for_same_day() {
        let store = MemoryRowStore::new();
        let row = json!({"user_id": "a", "habit_name": "Study", "date": "2026-10-19", "completed": true});
        let _: Value = store.insert(Table::Habits, &row).await.unwrap();

        let error = store.insert::<_, Value>(Table::Habits, &row).await.unwrap_err();
        assert!(error.is_conflict());
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let store = MemoryRowStore::new();
        store.fail_next(Operation::Delete);

        assert!(store.delete(Table::Tasks, &Query::owned_by("a")).await.is_err());
        assert!(store.delete(Table::Tasks, &Query::owned_by("a")).await.is_ok());
        assert_eq!(store.call_count(Operation::Delete, Table::Tasks), 2);
    }

    #[tokio::test]
    async fn boolean_filters_match_json_booleans() {
        let store = MemoryRowStore::new();
        store
            .seed(Table::Tasks, &json!({"user_id": "a", "title": "done", "completed": true}))
            .unwrap();
        store
            .seed(Table::Tasks, &json!({"user_id": "a", "title": "open"}))
            .unwrap();

        let done: Vec<Value> = store
            .select(Table::Tasks, &Query::owned_by("a").eq("completed", true))
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0]["title"], "done");
    }
}
