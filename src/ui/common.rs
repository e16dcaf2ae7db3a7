//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, PageState, View};
use crate::settings::format_interval;

/// Render the header bar with the store and record counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" LOGWATCH ", Style::default().add_modifier(Modifier::BOLD));
    let source = Span::raw(format!("│ {} │ ", app.source_description()));

    let summary = match &app.page {
        PageState::Loading => vec![Span::raw("Loading...")],
        PageState::Missing(_) => vec![Span::styled(
            "store not found",
            Style::default().fg(app.theme.warning),
        )],
        PageState::Failed(_) => vec![Span::styled(
            "load failed",
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        )],
        PageState::Ready(dash) => vec![
            Span::styled(
                dash.records.len().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("/{} records", dash.total_rows)),
        ],
    };

    let mut spans = vec![title, source];
    spans.extend(summary);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tab labels, in [`View::index`] order.
pub fn tab_titles() -> Vec<String> {
    View::ALL
        .iter()
        .map(|v| format!(" {}:{} ", v.index() + 1, v.label()))
        .collect()
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = tab_titles().into_iter().map(Line::from).collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last pass, auto-refresh countdown, controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let now = Instant::now();
    let auto = match app.refresh.remaining(now) {
        Some(left) => format!(
            "auto {} (next {:.0}s)",
            format_interval(app.refresh.interval()),
            left.as_secs_f64().ceil()
        ),
        None => "auto off".to_string(),
    };

    let controls = match app.current_view {
        View::Dashboard => "p/P:ping +/-:cpu c:clear r:refresh a:auto ?:help q:quit",
        View::Settings | View::About => "Tab:switch r:refresh a:auto ?:help q:quit",
    };

    let status = match &app.page {
        PageState::Ready(dash) => format!(
            " {} | Updated {:.1}s ago | {} | {}",
            app.current_view.label(),
            dash.loaded_at.elapsed().as_secs_f64(),
            auto,
            controls,
        ),
        PageState::Failed(err) => format!(" Error: {} | r:retry q:quit", err),
        PageState::Missing(_) => format!(" {} | {} | r:retry q:quit", app.current_view.label(), auto),
        PageState::Loading => " Loading... | q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/S-Tab   Switch pages"),
        Line::from("  1/2/3       Dashboard/Settings/About"),
        Line::from("  ↑/↓ j/k     Scroll records"),
        Line::from("  PgUp/PgDn   Jump 10 records"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Filters",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  p / P     Next/previous ping status"),
        Line::from("  + / →     Raise minimum CPU by 5%"),
        Line::from("  - / ←     Lower minimum CPU by 5%"),
        Line::from("  c         Clear filters"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from(format!(
            "  a         Auto refresh every {}",
            format_interval(app.refresh.interval())
        )),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 25u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
