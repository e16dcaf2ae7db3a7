//! Data models and processing for the log table.
//!
//! This module turns the rows read by a [`LogStore`](crate::store::LogStore)
//! into the filtered records and chart series the dashboard draws.
//!
//! ## Submodules
//!
//! - [`value`]: Dynamically typed cell values
//! - [`timestamp`]: Parsing and formatting of timestamp cells
//! - [`table`]: [`LogTable`], [`LogRow`] and the optional-column [`Schema`]
//! - [`filter`]: [`FilterState`] and the ping status / CPU threshold predicates
//! - [`chart`]: Resource usage series for the line chart
//! - [`dashboard`]: The per-pass [`Dashboard`] model
//!
//! ## Data Flow
//!
//! ```text
//! LogStore::load()
//!        │
//!        ▼
//! LogTable (timestamp column parsed, bad values nulled)
//!        │
//!        ▼
//! Dashboard::build()
//!        │
//!        ├──▶ filter::apply()        (ping_status == c AND cpu >= t)
//!        │
//!        └──▶ ChartView::from_table() (cpu / memory / disk over time)
//! ```

pub mod chart;
pub mod dashboard;
pub mod filter;
pub mod table;
pub mod timestamp;
pub mod value;

pub use chart::{ChartData, ChartView, Series, XAxis};
pub use dashboard::Dashboard;
pub use filter::{Category, FilterState};
pub use table::{KnownColumn, LogRow, LogTable, Metric, Schema};
pub use value::Value;
