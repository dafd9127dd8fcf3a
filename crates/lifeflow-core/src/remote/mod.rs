//! Remote data client for the hosted row store (Supabase PostgREST).
//!
//! Feature stores talk to tables through the [`RowStore`] trait. The real
//! implementation is [`RestClient`]; [`MemoryRowStore`] backs tests and
//! offline demos.

mod memory;
mod query;
mod rest;

use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::{MemoryRowStore, Operation};
pub use query::{Order, Query, OWNER_COLUMN};
pub use rest::RestClient;

/// Remote tables consumed by LifeFlow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tasks,
    Expenses,
    Habits,
    Notes,
    Bookmarks,
}

impl Table {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Expenses => "expenses",
            Self::Habits => "habits",
            Self::Notes => "notes",
            Self::Bookmarks => "bookmarks",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid data service configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Data API error: {message} ({status})")]
    Api { status: u16, message: String },
    #[error("Data API returned no row for {0}")]
    EmptyResponse(Table),
}

impl RemoteError {
    /// Transport-level failure (DNS, refused connection, timeout).
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Http(error) => error.is_connect() || error.is_timeout() || error.is_request(),
            _ => false,
        }
    }

    /// Unique constraint violation reported by the service.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status: 409, .. })
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Table-level operations every feature store needs.
///
/// Filters are equality-only; ordering and limit apply to `select`.
pub trait RowStore {
    fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        query: &Query,
    ) -> impl Future<Output = RemoteResult<Vec<T>>>;

    /// Insert one row and return it as stored (with generated columns).
    fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &B,
    ) -> impl Future<Output = RemoteResult<T>>;

    /// Patch every row matching `filter` and return the updated rows.
    fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        filter: &Query,
        patch: &B,
    ) -> impl Future<Output = RemoteResult<Vec<T>>>;

    /// Delete every row matching `filter`. Matching nothing is not an error.
    fn delete(&self, table: Table, filter: &Query) -> impl Future<Output = RemoteResult<()>>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

/// Extract a human readable message from a Supabase error body.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(message) = payload
            .message
            .or(payload.msg)
            .or(payload.error_description)
            .or(payload.error)
            .or(payload.details)
        {
            return message.trim().to_string();
        }
    }

    let trimmed = crate::util::compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}
