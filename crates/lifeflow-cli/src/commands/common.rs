use std::env;
use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use lifeflow_core::auth::AuthUser;
use lifeflow_core::config::ClientConfig;
use lifeflow_core::models::{Bookmark, Expense, OwnedRow, RowId, Task};
use lifeflow_core::remote::RestClient;
use lifeflow_core::storage::LocalStorage;
use serde::Serialize;

use crate::auth::{open_session, CliSession};
use crate::error::CliError;

pub const DATA_DIR_ENV: &str = "LIFEFLOW_DATA_DIR";
const SHORT_ID_LEN: usize = 8;

/// Service settings from flags, resolved against the environment on demand.
pub struct Connection {
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
}

/// Everything a gated page needs.
pub struct SignedIn {
    pub user: AuthUser,
    pub store: RestClient,
    pub session: CliSession,
}

impl Connection {
    pub const fn new(supabase_url: Option<String>, supabase_anon_key: Option<String>) -> Self {
        Self {
            supabase_url,
            supabase_anon_key,
        }
    }

    pub fn config(&self) -> Result<ClientConfig, CliError> {
        Ok(ClientConfig::resolve(
            self.supabase_url.clone(),
            self.supabase_anon_key.clone(),
            |key| env::var(key).ok(),
        )?)
    }

    pub async fn session(&self) -> Result<CliSession, CliError> {
        let config = self.config()?;
        Ok(open_session(&config).await?)
    }

    /// Session plus a data client carrying the user's token.
    pub async fn signed_in(&self) -> Result<SignedIn, CliError> {
        let config = self.config()?;
        let session = open_session(&config).await?;
        let user = session.require_user()?;
        let token = session
            .access_token()
            .ok_or(lifeflow_core::Error::NotSignedIn)?;
        let store = RestClient::new(&config)?.with_access_token(token);
        Ok(SignedIn {
            user,
            store,
            session,
        })
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn data_dir() -> Result<PathBuf, CliError> {
    if let Some(dir) = lifeflow_core::util::normalize_text_option(env::var(DATA_DIR_ENV).ok()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("lifeflow"))
        .ok_or(CliError::DataDirUnavailable)
}

pub fn open_local_storage() -> Result<LocalStorage, CliError> {
    Ok(LocalStorage::open_in(&data_dir()?)?)
}

pub fn short_id(id: RowId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

pub fn normalize_row_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyRowId)
    } else {
        Ok(trimmed.to_lowercase())
    }
}

/// Resolve a full id or a unique id prefix against loaded rows.
pub fn resolve_row_id<T: OwnedRow>(rows: &[T], query: &str) -> Result<RowId, CliError> {
    let query = normalize_row_identifier(query)?;
    if let Ok(id) = query.parse::<RowId>() {
        if rows.iter().any(|row| row.id() == id) {
            return Ok(id);
        }
    }

    let matching = rows
        .iter()
        .map(OwnedRow::id)
        .filter(|id| id.to_string().starts_with(&query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::RowNotFound(query)),
        [id] => Ok(*id),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|id| short_id(*id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousRowId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn join_words(parts: &[String]) -> Option<String> {
    lifeflow_core::util::normalize_required_text(&parts.join(" "))
}

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

pub fn format_task_lines(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| {
            let check = if task.completed { "[x]" } else { "[ ]" };
            let title = if task.completed {
                format!("~~{}~~", task.title)
            } else {
                task.title.clone()
            };
            format!("{}  {check} {title}", short_id(task.id))
        })
        .collect()
}

pub fn format_expense_lines(expenses: &[Expense]) -> Vec<String> {
    expenses
        .iter()
        .map(|expense| {
            format!(
                "{}  {:>10}  {}  ({})",
                short_id(expense.id),
                lifeflow_core::features::expenses::format_amount(expense.price),
                expense.item_name,
                format_date(expense.created_at)
            )
        })
        .collect()
}

pub fn format_bookmark_lines(bookmarks: &[Bookmark]) -> Vec<String> {
    bookmarks
        .iter()
        .map(|bookmark| format!("{}  {}  {}", short_id(bookmark.id), bookmark.title, bookmark.url))
        .collect()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
