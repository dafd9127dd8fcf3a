use std::io;

use lifeflow_core::auth::{AuthError, AuthFailure};
use lifeflow_core::config::ConfigError;
use lifeflow_core::remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] lifeflow_core::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthFailure),
    #[error("Authentication error: {0}")]
    AuthClient(#[from] AuthError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Row ID cannot be empty")]
    EmptyRowId,
    #[error("No row found for id/prefix: {0}")]
    RowNotFound(String),
    #[error("{0}")]
    AmbiguousRowId(String),
    #[error("Failed to resolve local data directory. Set LIFEFLOW_DATA_DIR.")]
    DataDirUnavailable,
    #[error("Invalid log filter: {0}")]
    LogFilter(String),
}
