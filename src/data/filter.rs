//! Row filtering by ping status and minimum CPU usage.

use std::collections::BTreeSet;

use super::{LogRow, LogTable, Metric};

/// Label of the sentinel meaning "no category restriction".
pub const ALL_LABEL: &str = "All";

/// Largest selectable CPU threshold.
pub const MAX_THRESHOLD: u8 = 100;

/// Step between selectable CPU thresholds.
pub const THRESHOLD_STEP: u8 = 5;

/// Selected `ping_status` restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Value(String),
}

impl Category {
    /// Build a selection from user input. The literal `All` selects the sentinel.
    pub fn parse(s: &str) -> Self {
        if s == ALL_LABEL {
            Category::All
        } else {
            Category::Value(s.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::All => ALL_LABEL,
            Category::Value(v) => v,
        }
    }
}

/// The user's current filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: Category,
    /// Minimum CPU usage in percent (0 disables the restriction).
    pub threshold: u8,
}

impl FilterState {
    pub fn new(category: Category, threshold: u8) -> Self {
        Self {
            category,
            threshold: snap_threshold(threshold),
        }
    }

    /// True when neither predicate restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.category == Category::All && self.threshold == 0
    }

    pub fn raise_threshold(&mut self) {
        self.threshold = self.threshold.saturating_add(THRESHOLD_STEP).min(MAX_THRESHOLD);
    }

    pub fn lower_threshold(&mut self) {
        self.threshold = self.threshold.saturating_sub(THRESHOLD_STEP);
    }

    /// Select the next category: `All`, then each option in order, then back to `All`.
    pub fn next_category(&mut self, options: &[String]) {
        self.category = match self.position(options) {
            None => options.first().cloned().map_or(Category::All, Category::Value),
            Some(i) if i + 1 < options.len() => Category::Value(options[i + 1].clone()),
            Some(_) => Category::All,
        };
    }

    /// Select the previous category, wrapping from `All` to the last option.
    pub fn prev_category(&mut self, options: &[String]) {
        self.category = match self.position(options) {
            None => options.last().cloned().map_or(Category::All, Category::Value),
            Some(0) => Category::All,
            Some(i) => Category::Value(options[i - 1].clone()),
        };
    }

    /// Reset a selection that is no longer offered by the data.
    ///
    /// Returns true if the selection changed.
    pub fn reconcile(&mut self, options: &[String]) -> bool {
        if let Category::Value(ref v) = self.category {
            if !options.iter().any(|o| o == v) {
                self.category = Category::All;
                return true;
            }
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn position(&self, options: &[String]) -> Option<usize> {
        match &self.category {
            Category::All => None,
            Category::Value(v) => options.iter().position(|o| o == v),
        }
    }
}

/// Round a threshold down to a selectable step and clamp it to 0..=100.
pub fn snap_threshold(threshold: u8) -> u8 {
    let clamped = threshold.min(MAX_THRESHOLD);
    clamped - clamped % THRESHOLD_STEP
}

/// Distinct non-null `ping_status` values, sorted. Empty if the column is absent.
pub fn ping_status_options(table: &LogTable) -> Vec<String> {
    if table.schema.ping_status.is_none() {
        return Vec::new();
    }
    table
        .rows
        .iter()
        .filter_map(|r| r.ping_status(&table.schema))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Apply the filter, returning the kept rows in their original order.
///
/// A predicate whose column is absent keeps every row. A threshold of 0 keeps
/// every row, including rows whose `cpu` is null.
pub fn apply(table: &LogTable, state: &FilterState) -> LogTable {
    let schema = &table.schema;

    let category = match (&state.category, schema.ping_status) {
        (Category::Value(v), Some(_)) => Some(v.as_str()),
        _ => None,
    };
    let threshold = match (state.threshold, schema.cpu) {
        (t, Some(_)) if t > 0 => Some(f64::from(t)),
        _ => None,
    };

    let keep = |row: &LogRow| {
        let category_ok = category.is_none_or(|c| row.ping_status(schema).as_deref() == Some(c));
        let threshold_ok =
            threshold.is_none_or(|t| row.metric(schema, Metric::Cpu).is_some_and(|cpu| cpu >= t));
        category_ok && threshold_ok
    };

    table.with_rows(table.rows.iter().filter(|r| keep(r)).cloned().collect())
}
