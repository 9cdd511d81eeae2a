use std::sync::PoisonError;
use thiserror::Error;
use crate::database::DatabaseError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Stored data failed to decode
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Mutex lock error
    #[error("Mutex lock error: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::MutexLock(error.to_string())
    }
}
