use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use logwatch::settings::parse_interval;
use logwatch::store::{LoadOutcome, LogStore, SqliteStore};
use logwatch::ui::{self, Theme};
use logwatch::{events, App, Category, Dashboard, FilterState, Settings};

#[derive(Parser, Debug)]
#[command(name = "logwatch")]
#[command(version)]
#[command(about = "Terminal dashboard for host monitoring records stored in SQLite")]
struct Args {
    /// SQLite database file [default: log.db]
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Table holding the monitoring records [default: system_log]
    #[arg(short, long)]
    table: Option<String>,

    /// Settings file (TOML). Defaults to ./logwatch.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Auto-refresh interval (e.g. "5s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Start with auto-refresh enabled
    #[arg(short, long)]
    auto_refresh: bool,

    /// Initial ping status filter ("All" keeps every record)
    #[arg(long, default_value = "All")]
    category: String,

    /// Initial minimum CPU usage in percent, rounded down to a multiple of 5
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_cpu: u8,

    /// Run one pass, print the filtered records as JSON and exit
    #[arg(long)]
    json: bool,

    /// Write logs to this file while the dashboard is open
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of file and environment settings.
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(db) = &self.db {
            settings.db_path = db.clone();
        }
        if let Some(table) = &self.table {
            settings.table = table.clone();
        }
        if let Some(refresh) = &self.refresh {
            parse_interval(refresh)?;
            settings.refresh_interval = refresh.clone();
        }
        if self.auto_refresh {
            settings.auto_refresh = true;
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = Some(log_file.clone());
        }
        Ok(())
    }

    fn filter(&self) -> FilterState {
        FilterState::new(Category::parse(&self.category), self.min_cpu)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings)?;
    let filter = args.filter();

    if args.json {
        init_stderr_tracing();
        return run_json(&settings, &filter);
    }

    let _guard = match &settings.log_file {
        Some(path) => Some(init_file_tracing(path)?),
        None => None,
    };

    let store = Box::new(SqliteStore::new(&settings.db_path, settings.table.clone()));
    run_tui(store, settings, filter)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init();
}

/// Send logs to a file; the terminal belongs to the UI.
fn init_file_tracing(path: &Path) -> Result<WorkerGuard> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .with_context(|| format!("log file has no name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;

    Ok(guard)
}

/// Headless mode: one pass printed to stdout
fn run_json(settings: &Settings, filter: &FilterState) -> Result<()> {
    let mut store = SqliteStore::new(&settings.db_path, settings.table.clone());

    match store.load()? {
        LoadOutcome::Missing(path) => {
            eprintln!(
                "Database not found. Please make sure '{}' exists.",
                path.display()
            );
            Ok(())
        }
        LoadOutcome::Loaded(table) => {
            let dashboard = Dashboard::build(table, filter);
            let json = serde_json::to_string_pretty(&dashboard.to_json(filter))?;
            println!("{}", json);
            Ok(())
        }
    }
}

/// Run the TUI with the given store
fn run_tui(store: Box<dyn LogStore>, settings: Settings, filter: FilterState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    info!(store = %store.description(), "starting dashboard");

    // Create app and run the first pass
    let mut app = App::new(store, settings, filter).with_theme(Theme::auto_detect());
    app.rerun();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(passes = app.passes, "dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, ui::TABS_ROW),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh when due
        app.tick(Instant::now());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    use config::Environment;
    use logwatch::settings::ENV_PREFIX;
    use tempfile::NamedTempFile;

    /// Settings from a file plus an injected `LOGWATCH_*` environment.
    fn layered(file: &str, vars: &[(&str, &str)]) -> Settings {
        let mut toml = NamedTempFile::new().unwrap();
        write!(toml, "{}", file).unwrap();
        let source: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true).source(Some(source));
        Settings::load_with_env(Some(toml.path()), env).unwrap()
    }

    const FILE: &str = r#"
db_path = "/data/file.db"
table = "file_table"
refresh_interval = "2s"
log_file = "/tmp/file.log"
"#;

    #[test]
    fn test_flags_override_file_and_env() {
        let mut settings = layered(
            FILE,
            &[("LOGWATCH_TABLE", "env_table"), ("LOGWATCH_DB_PATH", "/data/env.db")],
        );
        assert_eq!(settings.table, "env_table");

        let args = Args::try_parse_from([
            "logwatch",
            "--db",
            "/data/cli.db",
            "--table",
            "cli_table",
            "--refresh",
            "500ms",
            "--auto-refresh",
            "--log-file",
            "/tmp/cli.log",
        ])
        .unwrap();
        args.apply(&mut settings).unwrap();

        assert_eq!(settings.db_path, PathBuf::from("/data/cli.db"));
        assert_eq!(settings.table, "cli_table");
        assert_eq!(settings.refresh().unwrap(), Duration::from_millis(500));
        assert!(settings.auto_refresh);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/cli.log")));
    }

    #[test]
    fn test_absent_flags_keep_lower_layers() {
        let mut settings = layered(FILE, &[("LOGWATCH_TABLE", "env_table")]);
        let args = Args::try_parse_from(["logwatch"]).unwrap();
        args.apply(&mut settings).unwrap();

        assert_eq!(settings.db_path, PathBuf::from("/data/file.db"));
        assert_eq!(settings.table, "env_table");
        assert_eq!(settings.refresh().unwrap(), Duration::from_secs(2));
        assert!(!settings.auto_refresh);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/file.log")));
    }

    #[test]
    fn test_invalid_refresh_flag_is_rejected() {
        let mut settings = layered(FILE, &[]);
        let args = Args::try_parse_from(["logwatch", "--refresh", "soon"]).unwrap();
        assert!(args.apply(&mut settings).is_err());
        assert_eq!(settings.refresh_interval, "2s");
    }

    #[test]
    fn test_filter_flags() {
        let args = Args::try_parse_from(["logwatch", "--category", "up", "--min-cpu", "63"]).unwrap();
        assert_eq!(args.filter(), FilterState::new(Category::parse("up"), 60));

        assert!(Args::try_parse_from(["logwatch", "--min-cpu", "101"]).is_err());
        assert!(Args::try_parse_from(["logwatch"]).unwrap().filter().is_unrestricted());
    }
}
