//! Error types for store access.

use thiserror::Error;

/// Errors from loading the log table.
///
/// A missing store file is not an error; see
/// [`LoadOutcome::Missing`](super::LoadOutcome::Missing).
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failed to open or read the store (corrupt file, missing table,
    /// permission denied, ...).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The configured table name cannot be queried.
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
