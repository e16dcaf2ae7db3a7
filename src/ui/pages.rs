//! Settings and About pages. Both are static and never touch the store.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let notes = vec![
        Line::from(Span::styled("Settings", app.theme.header)),
        Line::from(""),
        Line::from("You can add custom configuration or thresholds here."),
        Line::from(""),
        Line::from(Span::styled("Examples of what you can configure:", bold)),
        Line::from("  - CPU alert threshold (e.g., > 80%)"),
        Line::from("  - Memory usage warning level"),
        Line::from("  - Disk usage warning level"),
    ];

    let s = &app.settings;
    let log_file = s
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let active = vec![
        Line::from(Span::styled("Active configuration", bold)),
        Line::from(""),
        setting_line("db_path", s.db_path.display().to_string()),
        setting_line("table", s.table.clone()),
        setting_line("refresh_interval", s.refresh_interval.clone()),
        setting_line("auto_refresh", s.auto_refresh.to_string()),
        setting_line("log_file", log_file),
        Line::from(""),
        Line::from(Span::styled(
            "Set in logwatch.toml, LOGWATCH_* variables, or command-line flags.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let chunks = Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).split(area);
    frame.render_widget(page(app, " Settings ", notes), chunks[0]);
    frame.render_widget(page(app, " Configuration ", active), chunks[1]);
}

pub fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("About", app.theme.header)),
        Line::from(""),
        Line::from("This dashboard was developed for the Networking & Protocols course."),
        Line::from(format!(
            "It uses real monitoring data stored in `{}`.",
            app.settings.db_path.display()
        )),
        Line::from(""),
        Line::from(format!("logwatch {}", env!("CARGO_PKG_VERSION"))),
    ];
    frame.render_widget(page(app, " About ", lines), area);
}

fn setting_line(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {:<18}", key)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn page<'a>(app: &App, title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    )
}
