//! # logwatch
//!
//! A read-only terminal dashboard and library for inspecting host monitoring
//! records kept in a SQLite `system_log` table.
//!
//! Every refresh runs one pass: load the whole table, narrow it with the
//! user's filters, then present the result as a count line, a record table
//! and a line chart of CPU, memory and disk usage.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (filter) │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  store  │◀── SqliteStore | MemoryStore                   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, page navigation, filter controls, refresh timer
//! - **[`store`]**: Record loading behind the [`LogStore`] trait
//! - **[`data`]**: Cell values, the loaded table, filters and the chart model
//! - **[`settings`]**: Layered configuration (file, environment, flags)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch ./log.db
//! logwatch
//!
//! # Another database, refreshing every 10 seconds
//! logwatch --db /var/lib/monitor/log.db --refresh 10s --auto-refresh
//!
//! # One headless pass, printed as JSON
//! logwatch --json --category up --min-cpu 50
//! ```
//!
//! ### As a library
//!
//! ```
//! use logwatch::{App, FilterState, MemoryStore, Settings};
//!
//! let store = Box::new(MemoryStore::missing());
//! let mut app = App::new(store, Settings::default(), FilterState::default());
//! app.rerun();
//! assert!(app.dashboard().is_none());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, PageState, View};
pub use data::{Category, ChartView, Dashboard, FilterState, LogTable, Metric, Value};
pub use settings::Settings;
pub use store::{LoadOutcome, LogStore, MemoryStore, SqliteStore, StoreError};
