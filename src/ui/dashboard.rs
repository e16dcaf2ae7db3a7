//! Dashboard view rendering.
//!
//! Displays the filter controls, the record count, the filtered record table
//! and the resource usage chart. When the store is missing, only a warning is
//! drawn.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, LegendPosition, Paragraph, Row,
        Table, TableState, Wrap,
    },
    Frame,
};

use crate::app::{App, PageState};
use crate::data::filter::{ALL_LABEL, MAX_THRESHOLD, THRESHOLD_STEP};
use crate::data::timestamp::from_epoch_seconds;
use crate::data::{ChartData, ChartView, Dashboard, LogTable, XAxis};

/// Notice drawn instead of a chart when no metric column exists.
pub const NO_METRICS_NOTICE: &str = "No CPU/Memory/Disk columns found in the data.";

/// Longest column width, in cells, before values are truncated.
const MAX_COLUMN_WIDTH: usize = 28;

/// Time spans shorter than this get time-of-day labels.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Rows sampled when sizing table columns.
const WIDTH_SAMPLE_ROWS: usize = 200;

/// Warning shown when the store file does not exist.
pub fn missing_store_message(path: &std::path::Path) -> String {
    format!(
        "Database not found. Please make sure '{}' exists.",
        path.display()
    )
}

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.page {
        PageState::Loading => {
            frame.render_widget(Paragraph::new(" Loading...").block(bordered(app, " Dashboard ")), area);
        }
        PageState::Missing(path) => {
            let warning = Paragraph::new(Line::from(Span::styled(
                missing_store_message(path),
                Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: true })
            .block(bordered(app, " Dashboard "));
            frame.render_widget(warning, area);
        }
        PageState::Failed(err) => {
            let lines = vec![
                Line::from(Span::styled(
                    "Failed to read the log table.",
                    Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(err.as_str()),
                Line::from(""),
                Line::from(Span::styled(
                    "Press r to retry.",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ];
            let paragraph =
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(bordered(app, " Dashboard "));
            frame.render_widget(paragraph, area);
        }
        PageState::Ready(dash) => render_ready(frame, app, dash, area),
    }
}

fn render_ready(frame: &mut Frame, app: &App, dash: &Dashboard, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3),      // Filters
        Constraint::Length(1),      // Record count
        Constraint::Percentage(50), // Records table
        Constraint::Min(6),         // Chart
    ])
    .split(area);

    render_filters(frame, app, dash, chunks[0]);

    let count = Line::from(vec![
        Span::raw(" Showing "),
        Span::styled(
            dash.records.len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" records after filtering."),
    ]);
    frame.render_widget(Paragraph::new(count), chunks[1]);

    render_table(frame, app, &dash.records, chunks[2]);
    render_chart(frame, app, &dash.chart, chunks[3]);
}

fn render_filters(frame: &mut Frame, app: &App, dash: &Dashboard, area: Rect) {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::raw(" Ping Status: ")];
    if dash.has_ping_status() {
        let label = app.filter.category.label();
        let style = if label == ALL_LABEL {
            bold
        } else {
            app.theme.ping_style(label).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::raw("◀ "));
        spans.push(Span::styled(label.to_string(), style));
        spans.push(Span::raw(format!(" ▶ ({} options)", dash.ping_options.len() + 1)));
    } else {
        spans.push(Span::styled("n/a", dim));
    }

    spans.push(Span::raw("   Minimum CPU Usage (%): "));
    if dash.has_cpu {
        spans.push(Span::styled(format!("{:>3}", app.filter.threshold), bold));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            threshold_bar(app.filter.threshold),
            Style::default().fg(app.theme.highlight),
        ));
    } else {
        spans.push(Span::styled("n/a", dim));
    }

    spans.push(Span::raw("   Auto refresh: "));
    spans.push(if app.refresh.is_enabled() {
        Span::styled("on", Style::default().fg(app.theme.healthy))
    } else {
        Span::styled("off", dim)
    });

    let paragraph = Paragraph::new(Line::from(spans)).block(bordered(app, " Filters "));
    frame.render_widget(paragraph, area);
}

/// Slider track for the threshold: one cell per step.
fn threshold_bar(threshold: u8) -> String {
    let steps = (MAX_THRESHOLD / THRESHOLD_STEP) as usize;
    let filled = (threshold / THRESHOLD_STEP) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(steps - filled))
}

fn render_table(frame: &mut Frame, app: &App, records: &LogTable, area: Rect) {
    let schema = &records.schema;

    let header = Row::new(
        schema
            .columns
            .iter()
            .map(|name| Cell::from(name.clone()))
            .collect::<Vec<_>>(),
    )
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = records
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<Cell> = (0..schema.len())
                .map(|i| {
                    let value = row.get(i);
                    let text = truncate(&value.to_string(), MAX_COLUMN_WIDTH);
                    let style = if value.is_null() {
                        Style::default().add_modifier(Modifier::DIM)
                    } else if Some(i) == schema.ping_status {
                        app.theme.ping_style(&text)
                    } else {
                        Style::default()
                    };
                    Cell::from(text).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let position_info = if records.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", app.selected_row + 1, records.len())
    };
    let title = format!(" Filtered Records{} ", position_info);

    let table = Table::new(rows, column_widths(records))
        .header(header)
        .block(bordered(app, &title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !records.is_empty() {
        state.select(Some(app.selected_row));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn column_widths(records: &LogTable) -> Vec<Constraint> {
    records
        .schema
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = records
                .rows
                .iter()
                .take(WIDTH_SAMPLE_ROWS)
                .map(|r| r.get(i).to_string().chars().count())
                .max()
                .unwrap_or(0);
            let width = widest.max(name.chars().count()).clamp(1, MAX_COLUMN_WIDTH);
            Constraint::Length(width as u16)
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn render_chart(frame: &mut Frame, app: &App, view: &ChartView, area: Rect) {
    let title = " Resource Usage Over Time ";

    let data = match view {
        ChartView::NoMetrics => {
            let notice = Paragraph::new(Line::from(Span::styled(
                NO_METRICS_NOTICE,
                Style::default().fg(app.theme.highlight),
            )))
            .block(bordered(app, title));
            frame.render_widget(notice, area);
            return;
        }
        ChartView::Chart(data) => data,
    };

    let datasets: Vec<Dataset> = data
        .series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.metric.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(app.theme.metric_style(s.metric))
                .data(&s.points)
        })
        .collect();

    let title = if data.point_count() == 0 {
        format!("{}(no plottable points) ", title)
    } else {
        title.to_string()
    };

    let x_title = match data.x_axis {
        XAxis::Time => "timestamp",
        XAxis::Position => "row",
    };

    let chart = Chart::new(datasets)
        .block(bordered(app, &title))
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)))
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(app.theme.border))
                .bounds(data.x_bounds)
                .labels(x_labels(data)),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .style(Style::default().fg(app.theme.border))
                .bounds(data.y_bounds)
                .labels(y_labels(data)),
        );

    frame.render_widget(chart, area);
}

/// Labels at the start, middle and end of the x axis.
pub fn x_labels(data: &ChartData) -> Vec<String> {
    let [lo, hi] = data.x_bounds;
    let marks = [lo, (lo + hi) / 2.0, hi];

    match data.x_axis {
        XAxis::Position => marks.iter().map(|x| format!("{:.0}", x)).collect(),
        XAxis::Time => {
            let format = if hi - lo < SECONDS_PER_DAY {
                "%H:%M:%S"
            } else {
                "%m-%d %H:%M"
            };
            marks
                .iter()
                .map(|x| {
                    from_epoch_seconds(*x)
                        .map(|ts| ts.format(format).to_string())
                        .unwrap_or_default()
                })
                .collect()
        }
    }
}

fn y_labels(data: &ChartData) -> Vec<String> {
    let [lo, hi] = data.y_bounds;
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|y| format!("{:.0}", y))
        .collect()
}

fn bordered<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, FilterState, Value};
    use crate::settings::Settings;
    use crate::store::MemoryStore;
    use crate::ui::render_to_string;

    fn app_with(table: Option<LogTable>) -> App {
        let store = match table {
            Some(t) => MemoryStore::new(t),
            None => MemoryStore::missing(),
        };
        let mut app = App::new(Box::new(store), Settings::default(), FilterState::default());
        app.rerun();
        app
    }

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> LogTable {
        LogTable::from_raw(columns.iter().map(|s| s.to_string()).collect(), rows).0
    }

    fn sample() -> LogTable {
        table(
            &["timestamp", "ping_status", "cpu", "memory"],
            vec![
                vec![
                    Value::Text("2024-01-01T00:00:00".into()),
                    Value::Text("up".into()),
                    Value::Integer(50),
                    Value::Integer(30),
                ],
                vec![
                    Value::Text("2024-01-01T00:01:00".into()),
                    Value::Text("down".into()),
                    Value::Integer(90),
                    Value::Integer(35),
                ],
            ],
        )
    }

    #[test]
    fn test_missing_store_renders_only_warning() {
        let mut app = app_with(None);
        app.filter = FilterState::new(Category::parse("up"), 50);
        app.rerun();

        let screen = render_to_string(120, 30, |f| render(f, &app, f.area()));
        assert!(screen.contains("Database not found."));
        assert!(!screen.contains("records after filtering"));
        assert!(!screen.contains("Filtered Records"));
        assert!(!screen.contains("Resource Usage Over Time"));
    }

    #[test]
    fn test_ready_renders_count_table_and_chart() {
        let app = app_with(Some(sample()));
        let screen = render_to_string(140, 40, |f| render(f, &app, f.area()));

        assert!(screen.contains("Showing 2 records after filtering."));
        assert!(screen.contains("Filtered Records"));
        assert!(screen.contains("ping_status"));
        assert!(screen.contains("2024-01-01 00:01:00"));
        assert!(screen.contains("Resource Usage Over Time"));
        assert!(!screen.contains(NO_METRICS_NOTICE));
    }

    #[test]
    fn test_no_metrics_shows_notice_and_table() {
        let t = table(
            &["timestamp", "ping_status"],
            vec![vec![Value::Text("2024-01-01".into()), Value::Text("up".into())]],
        );
        let app = app_with(Some(t));
        let screen = render_to_string(120, 30, |f| render(f, &app, f.area()));

        assert!(screen.contains(NO_METRICS_NOTICE));
        assert!(screen.contains("Showing 1 records after filtering."));
        assert!(screen.contains("Filtered Records"));
    }

    #[test]
    fn test_failed_load_renders_error() {
        let mut app = app_with(None);
        app.page = PageState::Failed("sqlite error: no such table: system_log".into());
        let screen = render_to_string(120, 20, |f| render(f, &app, f.area()));
        assert!(screen.contains("Failed to read the log table."));
        assert!(screen.contains("no such table"));
    }

    #[test]
    fn test_threshold_bar() {
        assert_eq!(threshold_bar(0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(threshold_bar(50).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(threshold_bar(100).chars().count(), 20);
    }

    #[test]
    fn test_x_labels_for_time_axis() {
        let ChartView::Chart(data) = ChartView::from_table(&sample()) else {
            panic!("expected a chart");
        };
        assert_eq!(x_labels(&data), vec!["00:00:00", "00:00:30", "00:01:00"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
