//! Error types for the campaign store.

use std::path::PathBuf;

/// Errors raised when the campaign store cannot be prepared or queried.
///
/// Every variant means the store is unavailable for the current operation;
/// none of them are recoverable by retrying the same call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The directory holding the database file could not be created.
    #[error("failed to create store directory '{}': {source}", path.display())]
    CreateDir {
        /// The directory that was being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),

    /// A SQL statement failed.
    #[error("store database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A query result did not carry a column the row mapping needs.
    #[error("campaign query result is missing column '{0}'")]
    MissingColumn(&'static str),
}
