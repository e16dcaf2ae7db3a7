//! Chart series derived from the filtered table.

use super::timestamp::to_epoch_seconds;
use super::{LogRow, LogTable, Metric};

/// What the horizontal axis of the chart represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Unix seconds of the row's timestamp.
    Time,
    /// Position of the row in the filtered table.
    Position,
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub metric: Metric,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw the resource chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub x_axis: XAxis,
    pub series: Vec<Series>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// The chart area's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// None of `cpu`, `memory`, `disk` exist in the table.
    NoMetrics,
    Chart(ChartData),
}

impl ChartView {
    /// Derive the chart from a filtered table.
    ///
    /// With a `timestamp` column, rows are stably sorted by timestamp and rows
    /// without one are left off the time axis. Without it, rows are plotted by
    /// position. Metric cells that are not numbers are skipped per series.
    pub fn from_table(table: &LogTable) -> Self {
        let schema = &table.schema;
        let metrics = schema.metrics();
        if metrics.is_empty() {
            return ChartView::NoMetrics;
        }

        let (x_axis, placed): (XAxis, Vec<(f64, &LogRow)>) = if schema.timestamp.is_some() {
            let mut timed: Vec<_> = table
                .rows
                .iter()
                .filter_map(|r| r.timestamp(schema).map(|ts| (ts, r)))
                .collect();
            timed.sort_by_key(|(ts, _)| *ts);
            (
                XAxis::Time,
                timed.into_iter().map(|(ts, r)| (to_epoch_seconds(ts), r)).collect(),
            )
        } else {
            (
                XAxis::Position,
                table.rows.iter().enumerate().map(|(i, r)| (i as f64, r)).collect(),
            )
        };

        let series: Vec<Series> = metrics
            .into_iter()
            .map(|metric| Series {
                metric,
                points: placed
                    .iter()
                    .filter_map(|(x, r)| r.metric(schema, metric).map(|y| (*x, y)))
                    .collect(),
            })
            .collect();

        let x_bounds = x_bounds(x_axis, &series);
        let y_bounds = y_bounds(&series);

        ChartView::Chart(ChartData {
            x_axis,
            series,
            x_bounds,
            y_bounds,
        })
    }
}

fn x_bounds(axis: XAxis, series: &[Series]) -> [f64; 2] {
    let xs = series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
    let (min, max) = min_max(xs).unwrap_or((0.0, 1.0));
    if max > min {
        return [min, max];
    }
    // A single x value still needs a visible span
    let pad = match axis {
        XAxis::Time => 30.0,
        XAxis::Position => 1.0,
    };
    [min - pad, max + pad]
}

fn y_bounds(series: &[Series]) -> [f64; 2] {
    let ys = series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    match min_max(ys) {
        Some((min, max)) => [min.min(0.0), max.max(100.0)],
        None => [0.0, 100.0],
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
