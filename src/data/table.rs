//! In-memory log table with an explicit optional-column schema.
//!
//! The store may hold any set of columns. The ones the dashboard understands
//! are resolved once into [`Schema`] indices, so every consumer matches on
//! `Option<usize>` instead of looking names up at the point of use.

use chrono::NaiveDateTime;

use super::timestamp::parse_value;
use super::Value;

/// Columns with a meaning to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownColumn {
    Timestamp,
    PingStatus,
    Cpu,
    Memory,
    Disk,
}

impl KnownColumn {
    pub const ALL: [KnownColumn; 5] = [
        KnownColumn::Timestamp,
        KnownColumn::PingStatus,
        KnownColumn::Cpu,
        KnownColumn::Memory,
        KnownColumn::Disk,
    ];

    /// Column name as stored.
    pub fn name(&self) -> &'static str {
        match self {
            KnownColumn::Timestamp => "timestamp",
            KnownColumn::PingStatus => "ping_status",
            KnownColumn::Cpu => "cpu",
            KnownColumn::Memory => "memory",
            KnownColumn::Disk => "disk",
        }
    }
}

/// Chartable resource metrics, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Disk,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cpu, Metric::Memory, Metric::Disk];

    pub fn column(&self) -> KnownColumn {
        match self {
            Metric::Cpu => KnownColumn::Cpu,
            Metric::Memory => KnownColumn::Memory,
            Metric::Disk => KnownColumn::Disk,
        }
    }

    pub fn label(&self) -> &'static str {
        self.column().name()
    }
}

/// Column names in stored order plus the position of each known column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub columns: Vec<String>,
    pub timestamp: Option<usize>,
    pub ping_status: Option<usize>,
    pub cpu: Option<usize>,
    pub memory: Option<usize>,
    pub disk: Option<usize>,
}

impl Schema {
    /// Resolve known columns by exact name. The first matching column wins.
    pub fn new(columns: Vec<String>) -> Self {
        let find = |col: KnownColumn| columns.iter().position(|c| c == col.name());
        Self {
            timestamp: find(KnownColumn::Timestamp),
            ping_status: find(KnownColumn::PingStatus),
            cpu: find(KnownColumn::Cpu),
            memory: find(KnownColumn::Memory),
            disk: find(KnownColumn::Disk),
            columns,
        }
    }

    pub fn index(&self, col: KnownColumn) -> Option<usize> {
        match col {
            KnownColumn::Timestamp => self.timestamp,
            KnownColumn::PingStatus => self.ping_status,
            KnownColumn::Cpu => self.cpu,
            KnownColumn::Memory => self.memory,
            KnownColumn::Disk => self.disk,
        }
    }

    pub fn has(&self, col: KnownColumn) -> bool {
        self.index(col).is_some()
    }

    /// Metrics present as columns, in chart order.
    pub fn metrics(&self) -> Vec<Metric> {
        Metric::ALL.into_iter().filter(|m| self.has(m.column())).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One monitoring sample, aligned with the table's [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub values: Vec<Value>,
}

impl LogRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&Value::Null)
    }

    /// The row's timestamp. `None` if the column is absent or the value is null.
    pub fn timestamp(&self, schema: &Schema) -> Option<NaiveDateTime> {
        schema.timestamp.and_then(|i| self.get(i).as_timestamp())
    }

    pub fn ping_status(&self, schema: &Schema) -> Option<String> {
        schema.ping_status.and_then(|i| self.get(i).category())
    }

    pub fn metric(&self, schema: &Schema, metric: Metric) -> Option<f64> {
        schema.index(metric.column()).and_then(|i| self.get(i).as_f64())
    }
}

/// An ordered snapshot of the log table for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub schema: Schema,
    pub rows: Vec<LogRow>,
}

impl LogTable {
    /// Build a table from raw stored values.
    ///
    /// The `timestamp` column, if any, is converted to date-times; values that
    /// fail to parse become null. Returns the table and the number of
    /// non-null values that were coerced to null.
    pub fn from_raw(columns: Vec<String>, rows: Vec<Vec<Value>>) -> (Self, usize) {
        let schema = Schema::new(columns);
        let mut coerced = 0;

        let rows = rows
            .into_iter()
            .map(|mut values| {
                if let Some(i) = schema.timestamp {
                    if let Some(cell) = values.get_mut(i) {
                        let raw = std::mem::replace(cell, Value::Null);
                        let was_null = raw.is_null();
                        *cell = parse_value(raw);
                        if !was_null && cell.is_null() {
                            coerced += 1;
                        }
                    }
                }
                LogRow::new(values)
            })
            .collect();

        (Self { schema, rows }, coerced)
    }

    /// A table with the same schema and the given rows.
    pub fn with_rows(&self, rows: Vec<LogRow>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
