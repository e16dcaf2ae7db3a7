//! SQLite-backed store.
//!
//! Reads the whole log table from a local SQLite file on every load.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::{Connection, OpenFlags};
use tracing::{info, warn};

use super::error::Result;
use super::{LoadOutcome, LogStore, StoreError};
use crate::data::{LogTable, Value};

/// Store file used when none is configured.
pub const DEFAULT_DB_PATH: &str = "log.db";

/// Table read when none is configured.
pub const DEFAULT_TABLE: &str = "system_log";

/// A store that reads one table from a SQLite file.
///
/// The file is opened read-only for the duration of a single
/// [`load`](LogStore::load) and closed before it returns.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: String,
    description: String,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P, table: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        let table = table.into();
        let description = format!("{}:{}", path.display(), table);
        Self {
            path,
            table,
            description,
        }
    }

    /// Returns the path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn query(&self) -> Result<String> {
        if self.table.trim().is_empty() {
            return Err(StoreError::InvalidTable(self.table.clone()));
        }
        Ok(format!("SELECT * FROM {}", quote_identifier(&self.table)))
    }

    fn read_table(&self) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
        let sql = self.query()?;
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut stmt = conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(Value::from(row.get_ref(i)?));
            }
            values.push(cells);
        }

        Ok((columns, values))
    }
}

impl LogStore for SqliteStore {
    fn load(&mut self) -> Result<LoadOutcome> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "store not found");
            return Ok(LoadOutcome::Missing(self.path.clone()));
        }

        let started = Instant::now();
        let (columns, rows) = self.read_table()?;
        let (table, coerced) = LogTable::from_raw(columns, rows);

        if coerced > 0 {
            warn!(count = coerced, "timestamp values could not be parsed and were nulled");
        }
        info!(
            store = %self.description,
            rows = table.len(),
            columns = table.schema.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded log table"
        );

        Ok(LoadOutcome::Loaded(table))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Quote an SQL identifier, doubling embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{KnownColumn, Metric};
    use tempfile::TempDir;

    fn create_db(dir: &TempDir, sql: &str) -> PathBuf {
        let path = dir.path().join("log.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(sql).unwrap();
        path
    }

    fn loaded(outcome: LoadOutcome) -> LogTable {
        match outcome {
            LoadOutcome::Loaded(table) => table,
            LoadOutcome::Missing(path) => panic!("store missing: {}", path.display()),
        }
    }

    #[test]
    fn test_sqlite_store_new() {
        let store = SqliteStore::new("/tmp/log.db", "system_log");
        assert_eq!(store.path(), Path::new("/tmp/log.db"));
        assert_eq!(store.table(), "system_log");
        assert_eq!(store.description(), "/tmp/log.db:system_log");
    }

    #[test]
    fn test_missing_file_is_soft_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.db");
        let mut store = SqliteStore::new(&path, DEFAULT_TABLE);

        assert_eq!(store.load().unwrap(), LoadOutcome::Missing(path.clone()));
        // Nothing was created by the probe
        assert!(!path.exists());
    }

    #[test]
    fn test_loads_all_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = create_db(
            &dir,
            "CREATE TABLE system_log (timestamp TEXT, ping_status TEXT, cpu REAL, memory REAL, disk REAL, host TEXT);
             INSERT INTO system_log VALUES ('2024-01-01T00:00:00', 'up', 50, 40.5, 70, 'a');
             INSERT INTO system_log VALUES ('2024-01-01T00:01:00', 'down', 90, NULL, 71, 'b');
             INSERT INTO system_log VALUES ('N/A', 'up', 10, 20, 30, 'c');",
        );

        let mut store = SqliteStore::new(&path, "system_log");
        let table = loaded(store.load().unwrap());

        assert_eq!(
            table.schema.columns,
            vec!["timestamp", "ping_status", "cpu", "memory", "disk", "host"]
        );
        assert_eq!(table.len(), 3);
        for col in KnownColumn::ALL {
            assert!(table.schema.has(col), "{} should be present", col.name());
        }

        let hosts: Vec<String> = table.rows.iter().map(|r| r.get(5).to_string()).collect();
        assert_eq!(hosts, vec!["a", "b", "c"]);

        assert!(table.rows[0].timestamp(&table.schema).is_some());
        assert_eq!(table.rows[2].timestamp(&table.schema), None);
        assert_eq!(table.rows[1].metric(&table.schema, Metric::Memory), None);
        assert_eq!(table.rows[1].metric(&table.schema, Metric::Cpu), Some(90.0));
    }

    #[test]
    fn test_reload_sees_new_rows() {
        let dir = TempDir::new().unwrap();
        let path = create_db(
            &dir,
            "CREATE TABLE system_log (cpu INTEGER); INSERT INTO system_log VALUES (1);",
        );
        let mut store = SqliteStore::new(&path, "system_log");
        assert_eq!(loaded(store.load().unwrap()).len(), 1);

        let conn = Connection::open(&path).unwrap();
        conn.execute("INSERT INTO system_log VALUES (2)", []).unwrap();
        drop(conn);

        assert_eq!(loaded(store.load().unwrap()).len(), 2);
    }

    #[test]
    fn test_missing_table_is_error() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, "CREATE TABLE other (x INTEGER);");
        let mut store = SqliteStore::new(&path, "system_log");
        assert!(matches!(store.load(), Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.db");
        std::fs::write(&path, b"this is not a sqlite database, just some bytes").unwrap();
        let mut store = SqliteStore::new(&path, "system_log");
        assert!(store.load().is_err());
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, "CREATE TABLE system_log (x INTEGER);");
        let mut store = SqliteStore::new(&path, "  ");
        assert!(matches!(store.load(), Err(StoreError::InvalidTable(_))));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("system_log"), "\"system_log\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
