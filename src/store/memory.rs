//! In-memory store.
//!
//! Serves a table held by the process. Useful for embedding the dashboard
//! where rows come from somewhere other than a SQLite file, and for tests.

use std::path::PathBuf;

use super::{LoadOutcome, LogStore, StoreError};
use crate::data::LogTable;

/// A store backed by an in-memory table.
///
/// `None` behaves like a store whose file does not exist.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    table: Option<LogTable>,
    description: String,
    loads: usize,
}

impl MemoryStore {
    pub fn new(table: LogTable) -> Self {
        Self {
            table: Some(table),
            description: "memory".to_string(),
            loads: 0,
        }
    }

    /// A store that reports itself as missing.
    pub fn missing() -> Self {
        Self {
            table: None,
            description: "memory (empty)".to_string(),
            loads: 0,
        }
    }

    /// Replace the table returned by subsequent loads.
    pub fn set_table(&mut self, table: Option<LogTable>) {
        self.table = table;
    }

    /// Number of times [`LogStore::load`] has been called.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl LogStore for MemoryStore {
    fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        self.loads += 1;
        Ok(match &self.table {
            Some(table) => LoadOutcome::Loaded(table.clone()),
            None => LoadOutcome::Missing(PathBuf::from(":memory:")),
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_loads_copy() {
        let mut store = MemoryStore::new(LogTable::default());
        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded(LogTable::default()));
        assert_eq!(store.loads(), 1);
    }

    #[test]
    fn test_memory_store_missing() {
        let mut store = MemoryStore::missing();
        assert!(matches!(store.load().unwrap(), LoadOutcome::Missing(_)));
        store.set_table(Some(LogTable::default()));
        assert!(matches!(store.load().unwrap(), LoadOutcome::Loaded(_)));
    }
}
