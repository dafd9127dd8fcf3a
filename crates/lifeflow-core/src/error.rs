//! Error types for lifeflow-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::models::RowId;
use crate::remote::RemoteError;

/// Result type alias using lifeflow-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lifeflow-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any remote call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Data service error
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Auth service error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Operation needs an authenticated user
    #[error("Not signed in. Run `lifeflow auth login` first.")]
    NotSignedIn,

    /// Row is not part of the local mirror (or vanished remotely)
    #[error("Row not found: {0}")]
    RowNotFound(RowId),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Local validation failures. None of these ever reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("{0} cannot be empty")]
    EmptyText(&'static str),
    #[error("Please enter a valid price")]
    InvalidPrice,
    #[error("URL cannot be empty")]
    EmptyUrl,
    #[error("Date must not be in the past")]
    DateInPast,
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),
}
