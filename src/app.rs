//! Application state, navigation and the refresh pipeline.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::data::filter::ping_status_options;
use crate::data::{Dashboard, FilterState};
use crate::settings::Settings;
use crate::store::{LoadOutcome, LogStore};
use crate::ui::Theme;

/// The current page in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Filters, record table and resource chart.
    Dashboard,
    /// Static configuration notes.
    Settings,
    /// Static information about the dashboard.
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Settings, View::About];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Settings,
            View::Settings => View::About,
            View::About => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::About,
            View::Settings => View::Dashboard,
            View::About => View::Settings,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Settings => "Settings",
            View::About => "About",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Settings => 1,
            View::About => 2,
        }
    }
}

/// When the next automatic pass is due.
///
/// The event loop asks [`is_due`](Self::is_due) on every iteration; nothing
/// here sleeps.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    enabled: bool,
    next_due: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration, enabled: bool, now: Instant) -> Self {
        Self {
            interval,
            enabled,
            next_due: enabled.then(|| now + interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle auto-refresh. Returns the new state.
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.enabled = !self.enabled;
        self.reset(now);
        self.enabled
    }

    /// Restart the countdown after a pass.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = self.enabled.then(|| now + self.interval);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Time left until the next automatic pass, if enabled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// What the last pass produced.
#[derive(Debug, Clone)]
pub enum PageState {
    /// No pass has run yet.
    Loading,
    /// The store file does not exist.
    Missing(PathBuf),
    /// The store could not be read.
    Failed(String),
    Ready(Dashboard),
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    store: Box<dyn LogStore>,
    pub page: PageState,
    pub passes: u64,

    // Session state, kept across passes
    pub filter: FilterState,
    pub refresh: RefreshSchedule,
    pub selected_row: usize,

    /// Active settings, echoed on the Settings page.
    pub settings: Settings,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App. No pass runs until [`rerun`](Self::rerun) is called.
    pub fn new(store: Box<dyn LogStore>, settings: Settings, filter: FilterState) -> Self {
        let interval = settings
            .refresh()
            .unwrap_or(crate::settings::DEFAULT_REFRESH_INTERVAL);
        let refresh = RefreshSchedule::new(interval, settings.auto_refresh, Instant::now());
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            store,
            page: PageState::Loading,
            passes: 0,
            filter,
            refresh,
            selected_row: 0,
            settings,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Use the given theme instead of the dark default.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the store.
    pub fn source_description(&self) -> &str {
        self.store.description()
    }

    /// The dashboard model, if the last pass loaded data.
    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.page {
            PageState::Ready(dash) => Some(dash),
            _ => None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Run a full pass: load the store, filter, and rebuild the dashboard.
    pub fn rerun(&mut self) {
        self.rerun_at(Instant::now());
    }

    pub fn rerun_at(&mut self, now: Instant) {
        self.passes += 1;

        self.page = match self.store.load() {
            Ok(LoadOutcome::Loaded(table)) => {
                if self.filter.reconcile(&ping_status_options(&table)) {
                    self.set_status_message("Ping status no longer present, showing All".into());
                }
                PageState::Ready(Dashboard::build(table, &self.filter))
            }
            Ok(LoadOutcome::Missing(path)) => PageState::Missing(path),
            Err(e) => {
                error!(store = %self.store.description(), error = %e, "failed to load log table");
                PageState::Failed(e.to_string())
            }
        };

        self.refresh.reset(now);
        self.clamp_selection();
    }

    /// Run a pass if auto-refresh is due. Returns true if one ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.refresh.is_due(now) {
            self.rerun_at(now);
            true
        } else {
            false
        }
    }

    pub fn toggle_auto_refresh(&mut self, now: Instant) {
        let enabled = self.refresh.toggle(now);
        info!(enabled, interval_ms = self.refresh.interval().as_millis() as u64, "auto-refresh toggled");
        let msg = if enabled {
            format!(
                "Auto refresh every {}",
                crate::settings::format_interval(self.refresh.interval())
            )
        } else {
            "Auto refresh off".to_string()
        };
        self.set_status_message(msg);
    }

    /// Select the next ping status option and rerun.
    pub fn next_category(&mut self) {
        let Some(options) = self.category_options() else {
            return;
        };
        self.filter.next_category(&options);
        self.rerun();
    }

    /// Select the previous ping status option and rerun.
    pub fn prev_category(&mut self) {
        let Some(options) = self.category_options() else {
            return;
        };
        self.filter.prev_category(&options);
        self.rerun();
    }

    pub fn raise_threshold(&mut self) {
        if self.dashboard().is_some_and(|d| d.has_cpu) {
            self.filter.raise_threshold();
            self.rerun();
        }
    }

    pub fn lower_threshold(&mut self) {
        if self.dashboard().is_some_and(|d| d.has_cpu) {
            self.filter.lower_threshold();
            self.rerun();
        }
    }

    /// Clear both filters and rerun.
    pub fn reset_filters(&mut self) {
        if !self.filter.is_unrestricted() {
            self.filter.reset();
            self.rerun();
            self.set_status_message("Filters cleared".to_string());
        }
    }

    fn category_options(&self) -> Option<Vec<String>> {
        self.dashboard()
            .filter(|d| d.has_ping_status())
            .map(|d| d.ping_options.clone())
    }

    fn record_count(&self) -> usize {
        self.dashboard().map_or(0, |d| d.records.len())
    }

    fn clamp_selection(&mut self) {
        self.selected_row = self.selected_row.min(self.record_count().saturating_sub(1));
    }

    /// Switch to the next view (cycles through Dashboard → Settings → About).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.record_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.selected_row = self.record_count().saturating_sub(1);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
