//! Layered settings: defaults, optional TOML file, `LOGWATCH_*` environment.
//!
//! ```toml
//! db_path = "log.db"
//! table = "system_log"
//! refresh_interval = "5s"
//! auto_refresh = false
//! log_file = "logwatch.log"
//! ```
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::store::{DEFAULT_DB_PATH, DEFAULT_TABLE};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "logwatch.toml";

/// Prefix for environment overrides, e.g. `LOGWATCH_DB_PATH`.
pub const ENV_PREFIX: &str = "LOGWATCH";

/// Cadence of auto-refresh when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Where to read records from and how often, after all layers are merged.
///
/// Missing keys fall back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file holding the log table.
    pub db_path: PathBuf,
    /// Table to read.
    pub table: String,
    /// Auto-refresh cadence, e.g. "5s" or "500ms".
    pub refresh_interval: String,
    /// Start with auto-refresh enabled.
    pub auto_refresh: bool,
    /// Where to write tracing output in TUI mode.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table: DEFAULT_TABLE.to_string(),
            refresh_interval: "5s".to_string(),
            auto_refresh: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required) or from `logwatch.toml` if present,
    /// then from the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Like [`load`](Self::load), reading overrides from the given environment
    /// source instead of the process environment.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.refresh()?;
        Ok(settings)
    }

    /// The parsed auto-refresh interval.
    pub fn refresh(&self) -> Result<Duration> {
        parse_interval(&self.refresh_interval)
    }
}

/// Suffix to milliseconds multiplier (longer suffixes first)
const INTERVAL_UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0)];

/// Parse an interval like "5s", "500ms", "1.5s" or "2m". A bare number is seconds.
pub fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim();

    let (number, multiplier) = INTERVAL_UNITS
        .iter()
        .find_map(|(suffix, mult)| s.strip_suffix(suffix).map(|n| (n, *mult)))
        .unwrap_or((s, 1_000.0));

    let value: f64 = number
        .trim()
        .parse()
        .with_context(|| format!("invalid interval: {:?}", s))?;
    let millis = value * multiplier;
    if !millis.is_finite() || millis < 100.0 {
        bail!("refresh interval must be at least 100ms, got {:?}", s);
    }

    Ok(Duration::from_millis(millis as u64))
}

/// Format an interval for display
pub fn format_interval(d: Duration) -> String {
    let millis = d.as_millis();
    if millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{}ms", millis)
    }
}
