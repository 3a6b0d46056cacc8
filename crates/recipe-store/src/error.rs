//! Error types for the recipe-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`].
//! Nothing is retried or translated here; failures reach the caller as-is.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the recipe store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization or deserialization of a record body failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema could not be created, or the database is at a version
    /// this build does not understand.
    #[error("schema v{version}: {message}")]
    Schema { version: u32, message: String },

    /// A record was rejected before being written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Filesystem error while preparing the data directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The process-wide store was used before [`crate::init`] completed.
    #[error("recipe store has not been initialized")]
    NotInitialized,

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}
