//! The model produced by one load → filter → present pass.

use std::time::Instant;

use serde_json::json;

use super::filter::{self, ping_status_options, FilterState};
use super::{ChartView, KnownColumn, LogTable};

/// Everything the dashboard view draws, derived from one freshly loaded table.
///
/// The loaded table itself is consumed by [`Dashboard::build`]; only the
/// filtered rows survive until the next pass.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Distinct `ping_status` values in the loaded table (without `All`).
    pub ping_options: Vec<String>,
    /// Whether the threshold control applies to this data.
    pub has_cpu: bool,
    /// Rows loaded before filtering.
    pub total_rows: usize,
    /// Rows kept by the filter, in stored order.
    pub records: LogTable,
    pub chart: ChartView,
    pub loaded_at: Instant,
}

impl Dashboard {
    pub fn build(table: LogTable, state: &FilterState) -> Self {
        let ping_options = ping_status_options(&table);
        let has_cpu = table.schema.has(KnownColumn::Cpu);
        let records = filter::apply(&table, state);
        let chart = ChartView::from_table(&records);

        tracing::debug!(
            loaded = table.len(),
            kept = records.len(),
            category = state.category.label(),
            threshold = state.threshold,
            "filter applied"
        );

        Self {
            ping_options,
            has_cpu,
            total_rows: table.len(),
            records,
            chart,
            loaded_at: Instant::now(),
        }
    }

    pub fn has_ping_status(&self) -> bool {
        self.records.schema.has(KnownColumn::PingStatus)
    }

    /// The literal record count line shown above the table.
    pub fn count_line(&self) -> String {
        format!("Showing {} records after filtering.", self.records.len())
    }

    /// Filtered records as JSON objects keyed by column name.
    pub fn records_json(&self) -> serde_json::Value {
        let columns = &self.records.schema.columns;
        let rows: Vec<serde_json::Value> = self
            .records
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = columns
                    .iter()
                    .zip(&row.values)
                    .map(|(name, value)| {
                        (name.clone(), serde_json::to_value(value).unwrap_or_default())
                    })
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }

    /// Summary document used by the headless `--json` mode.
    pub fn to_json(&self, state: &FilterState) -> serde_json::Value {
        json!({
            "filter": {
                "ping_status": state.category.label(),
                "min_cpu": state.threshold,
            },
            "total": self.total_rows,
            "count": self.records.len(),
            "columns": self.records.schema.columns,
            "records": self.records_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Category;
    use crate::data::Value;

    fn table() -> LogTable {
        LogTable::from_raw(
            vec!["timestamp".into(), "ping_status".into(), "cpu".into()],
            vec![
                vec![
                    Value::Text("2024-01-01T00:00:00".into()),
                    Value::Text("up".into()),
                    Value::Integer(50),
                ],
                vec![
                    Value::Text("2024-01-01T00:01:00".into()),
                    Value::Text("down".into()),
                    Value::Integer(90),
                ],
            ],
        )
        .0
    }

    #[test]
    fn test_build_counts_and_options() {
        let dash = Dashboard::build(table(), &FilterState::new(Category::All, 60));
        assert_eq!(dash.total_rows, 2);
        assert_eq!(dash.records.len(), 1);
        assert_eq!(dash.ping_options, vec!["down", "up"]);
        assert!(dash.has_cpu);
        assert!(dash.has_ping_status());
        assert_eq!(dash.count_line(), "Showing 1 records after filtering.");
    }

    #[test]
    fn test_options_come_from_unfiltered_rows() {
        let dash = Dashboard::build(table(), &FilterState::new(Category::parse("up"), 0));
        assert_eq!(dash.records.len(), 1);
        assert_eq!(dash.ping_options.len(), 2);
    }

    #[test]
    fn test_json_document() {
        let state = FilterState::new(Category::parse("down"), 0);
        let doc = Dashboard::build(table(), &state).to_json(&state);
        assert_eq!(doc["count"], 1);
        assert_eq!(doc["total"], 2);
        assert_eq!(doc["filter"]["ping_status"], "down");
        assert_eq!(doc["records"][0]["cpu"], 90);
        assert_eq!(doc["records"][0]["timestamp"], "2024-01-01T00:01:00");
    }
}
