//! Terminal UI rendering using ratatui.
//!
//! Each page is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Filters, record count, record table and resource chart
//! - [`pages`]: Static Settings and About pages
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop calls [`draw`] once per frame:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Page Content                         │
//! │ (dashboard::render / pages::*)       │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod dashboard;
pub mod pages;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 16;

/// Screen row of the tab bar, below the header.
pub const TABS_ROW: u16 = 1;

/// Draw the whole screen for the current state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Dashboard => dashboard::render(frame, app, chunks[2]),
        View::Settings => pages::render_settings(frame, app, chunks[2]),
        View::About => pages::render_about(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

/// Render into an off-screen buffer and return its text, one line per row.
#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    render: impl FnOnce(&mut Frame),
) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(render).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FilterState;
    use crate::settings::Settings;
    use crate::store::MemoryStore;

    fn app() -> App {
        let mut app = App::new(
            Box::new(MemoryStore::missing()),
            Settings::default(),
            FilterState::default(),
        );
        app.rerun();
        app
    }

    #[test]
    fn test_draw_full_screen() {
        let app = app();
        let screen = render_to_string(100, 30, |f| draw(f, &app));
        assert!(screen.contains("LOGWATCH"));
        assert!(screen.contains("1:Dashboard"));
        assert!(screen.contains("Database not found."));
    }

    #[test]
    fn test_draw_other_pages_ignore_missing_store() {
        let mut app = app();
        app.set_view(View::About);
        let screen = render_to_string(100, 30, |f| draw(f, &app));
        assert!(!screen.contains("Database not found."));
    }

    #[test]
    fn test_draw_too_small() {
        let app = app();
        let screen = render_to_string(40, 10, |f| draw(f, &app));
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let screen = render_to_string(100, 30, |f| draw(f, &app));
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
