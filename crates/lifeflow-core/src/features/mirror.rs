//! Local mirror of one table's rows for the current owner.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{OwnedRow, RowId};
use crate::remote::{Query, RowStore, Table, OWNER_COLUMN};

/// Rows of `table` owned by `owner`, kept in sync with confirmed writes.
///
/// Every write goes to the store first; the mirror only changes once the
/// store has returned the row. A failed call leaves the mirror as it was,
/// except `fetch`, which leaves it empty.
#[derive(Debug)]
pub struct ScopedMirror<R, T> {
    store: R,
    table: Table,
    owner: String,
    rows: Vec<T>,
}

impl<R, T> ScopedMirror<R, T>
where
    R: RowStore,
    T: OwnedRow + DeserializeOwned,
{
    pub fn new(store: R, table: Table, owner: impl Into<String>) -> Self {
        Self {
            store,
            table,
            owner: owner.into(),
            rows: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub const fn store(&self) -> &R {
        &self.store
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Query scoped to the owner; callers add ordering and extra filters.
    pub fn scoped_query(&self) -> Query {
        Query::owned_by(&self.owner)
    }

    /// Replace the mirror with the rows matching `query`.
    pub async fn fetch(&mut self, query: &Query) -> Result<&[T]> {
        self.rows.clear();
        match self.store.select::<T>(self.table, query).await {
            Ok(rows) => {
                tracing::debug!(table = %self.table, count = rows.len(), "Fetched rows");
                self.rows = rows;
                Ok(self.rows.as_slice())
            }
            Err(error) => {
                tracing::warn!(table = %self.table, "Failed to fetch rows: {}", error);
                Err(error.into())
            }
        }
    }

    /// Insert one row and put the stored row at the front of the mirror.
    pub async fn create<B: Serialize>(&mut self, payload: &B) -> Result<&T> {
        let row = self
            .store
            .insert::<B, T>(self.table, payload)
            .await
            .map_err(|error| self.log_failure("insert", error))?;
        self.rows.insert(0, row);
        Ok(&self.rows[0])
    }

    /// Patch one owned row and replace the mirrored copy with the result.
    pub async fn update<B: Serialize>(&mut self, id: RowId, patch: &B) -> Result<&T> {
        let filter = Query::by_id(id).eq(OWNER_COLUMN, &self.owner);
        let updated = self
            .store
            .update::<B, T>(self.table, &filter, patch)
            .await
            .map_err(|error| self.log_failure("update", error))?;
        let Some(row) = updated.into_iter().next() else {
            tracing::warn!(table = %self.table, %id, "Update matched no row");
            return Err(Error::RowNotFound(id));
        };

        let position = match self.rows.iter().position(|existing| existing.id() == id) {
            Some(position) => {
                self.rows[position] = row;
                position
            }
            None => {
                self.rows.insert(0, row);
                0
            }
        };
        Ok(&self.rows[position])
    }

    /// Delete one owned row. An id the mirror does not hold is not an error.
    pub async fn remove(&mut self, id: RowId) -> Result<()> {
        let filter = Query::by_id(id).eq(OWNER_COLUMN, &self.owner);
        self.store
            .delete(self.table, &filter)
            .await
            .map_err(|error| self.log_failure("delete", error))?;
        self.rows.retain(|row| row.id() != id);
        Ok(())
    }

    fn log_failure(&self, operation: &str, error: crate::remote::RemoteError) -> Error {
        tracing::warn!(table = %self.table, operation, "Remote write failed: {}", error);
        error.into()
    }
}
