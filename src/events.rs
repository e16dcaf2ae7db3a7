use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_titles;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports key releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Page switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Settings),
        KeyCode::Char('3') => app.set_view(View::About),

        // Refresh
        KeyCode::Char('r') | KeyCode::F(5) => app.rerun(),
        KeyCode::Char('a') => app.toggle_auto_refresh(Instant::now()),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ if app.current_view == View::Dashboard => handle_dashboard_key(app, key),
        _ => {}
    }
}

/// Keys that only apply to the Dashboard page
fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Filters
        KeyCode::Char('p') | KeyCode::Char(']') => app.next_category(),
        KeyCode::Char('P') | KeyCode::Char('[') => app.prev_category(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.raise_threshold(),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => app.lower_threshold(),
        KeyCode::Char('c') => app.reset_filters(),

        // Record navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, tabs_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp if app.current_view == View::Dashboard => app.select_prev(),
        MouseEventKind::ScrollDown if app.current_view == View::Dashboard => app.select_next(),

        // Click a tab to switch pages
        MouseEventKind::Down(MouseButton::Left) if mouse.row == tabs_row => {
            if let Some(view) = tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        _ => {}
    }
}

/// Which tab covers the given column, following the layout of the tab bar.
pub fn tab_at(column: u16) -> Option<View> {
    const DIVIDER_WIDTH: u16 = 1;

    let mut start = 0u16;
    for (view, title) in View::ALL.iter().zip(tab_titles()) {
        // Tabs pads each title with one space on either side
        let width = title.chars().count() as u16 + 2;
        if column < start + width {
            return Some(*view);
        }
        if column < start + width + DIVIDER_WIDTH {
            return None;
        }
        start += width + DIVIDER_WIDTH;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, FilterState, LogTable, Value};
    use crate::settings::Settings;
    use crate::store::MemoryStore;

    fn app() -> App {
        let (table, _) = LogTable::from_raw(
            vec!["ping_status".into(), "cpu".into()],
            vec![
                vec![Value::Text("up".into()), Value::Integer(50)],
                vec![Value::Text("down".into()), Value::Integer(90)],
            ],
        );
        let mut app = App::new(
            Box::new(MemoryStore::new(table)),
            Settings::default(),
            FilterState::default(),
        );
        app.rerun();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Settings);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_view, View::About);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_view, View::Settings);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_view, View::Dashboard);
    }

    #[test]
    fn test_filter_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.filter.category, Category::parse("down"));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.filter.threshold, 10);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.filter.threshold, 5);
        press(&mut app, KeyCode::Char('c'));
        assert!(app.filter.is_unrestricted());
    }

    #[test]
    fn test_filter_keys_ignored_off_dashboard() {
        let mut app = app();
        app.set_view(View::Settings);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.filter.threshold, 0);
    }

    #[test]
    fn test_refresh_key_runs_pass() {
        let mut app = app();
        let before = app.passes;
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.passes, before + 1);
    }

    #[test]
    fn test_auto_refresh_toggle() {
        let mut app = app();
        assert!(!app.refresh.is_enabled());
        press(&mut app, KeyCode::Char('a'));
        assert!(app.refresh.is_enabled());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_tab_at() {
        // " 1:Dashboard " is 13 chars, padded to 15
        assert_eq!(tab_at(0), Some(View::Dashboard));
        assert_eq!(tab_at(14), Some(View::Dashboard));
        assert_eq!(tab_at(16), Some(View::Settings));
        assert_eq!(tab_at(200), None);
    }

    #[test]
    fn test_click_on_divider_selects_nothing() {
        // "|" after the Dashboard and Settings tabs
        assert_eq!(tab_at(15), None);
        assert_eq!(tab_at(30), None);
        assert_eq!(tab_at(29), Some(View::Settings));
        assert_eq!(tab_at(31), Some(View::About));

        let mut app = app();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 15,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, 1);
        assert_eq!(app.current_view, View::Dashboard);
    }
}
