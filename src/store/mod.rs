//! Store abstraction for loading the log table.
//!
//! The dashboard reads its rows through the [`LogStore`] trait. The normal
//! backend is [`SqliteStore`], which reads a local SQLite file; [`MemoryStore`]
//! serves a table held in memory.

mod error;
mod memory;
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, DEFAULT_DB_PATH, DEFAULT_TABLE};

use std::fmt::Debug;
use std::path::PathBuf;

use crate::data::LogTable;

/// Result of a load that did not hit an unexpected store error.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The whole table, in stored order.
    Loaded(LogTable),
    /// The store does not exist. Nothing was opened.
    Missing(PathBuf),
}

/// Trait for loading the log table from a backing store.
///
/// # Example
///
/// ```
/// use logwatch::{LoadOutcome, LogStore, SqliteStore};
///
/// let mut store = SqliteStore::new("does-not-exist.db", "system_log");
/// assert!(matches!(store.load(), Ok(LoadOutcome::Missing(_))));
/// ```
pub trait LogStore: Send + Debug {
    /// Read every row and column of the table.
    ///
    /// A missing store is reported as [`LoadOutcome::Missing`], not as an
    /// error. Each call reads the store again from scratch.
    fn load(&mut self) -> Result<LoadOutcome, StoreError>;

    /// Returns a human-readable description of the store.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
