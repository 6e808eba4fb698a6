//! Common processing logic shared between the chart and series commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::usage::{AggregationResult, FilterState, SeriesKey, UsageEvent, aggregate_window};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs;
use std::io::{Read, Write};
use strum::Display;

/// Events path that means "read from standard input"
const STDIN_PATH: &str = "-";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between chart and series commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON file holding the request-log events, or `-` to read standard input
    #[arg(long, short = 'e', value_name = "PATH")]
    pub events: Utf8PathBuf,

    /// Path to configuration file (default is `usage-lens.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Use this RFC 3339 instant as the current time instead of the system clock
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Toggle a series on by key (repeatable); with none toggled every series is shown
    #[arg(long = "series", short = 's', value_name = "KEY")]
    pub series: Vec<String>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

fn parse_now(value: &str) -> core::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{value}' is not an RFC 3339 timestamp: {e}"))
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    pub now: DateTime<Utc>,
    host: &'a mut H,
    events: Utf8PathBuf,
    series: Vec<String>,
}

impl<'a, H: Host> Common<'a, H> {
    /// Create a new Common processor with logger and config
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        Ok(Self {
            config,
            now: args.now.unwrap_or_else(Utc::now),
            host,
            events: args.events.clone(),
            series: args.series.clone(),
        })
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Read and parse the events file, or standard input when the path is `-`
    pub fn load_events(&mut self) -> Result<Vec<UsageEvent>> {
        let text = if self.events == STDIN_PATH {
            let mut text = String::new();
            let _ = self.host.input().read_to_string(&mut text).into_app_err("reading events from standard input")?;
            text
        } else {
            fs::read_to_string(&self.events).into_app_err_with(|| format!("reading events file '{}'", self.events))?
        };

        let events: Vec<UsageEvent> =
            serde_json::from_str(&text).into_app_err_with(|| format!("parsing events from '{}'", self.events))?;
        log::info!("loaded {} event(s) from '{}'", events.len(), self.events);
        Ok(events)
    }

    /// Load the events and aggregate them over the configured window
    pub fn aggregate(&mut self) -> Result<AggregationResult> {
        let events = self.load_events()?;
        let window = self.config.window();
        log::info!("aggregating into {} hourly bucket(s) ending around {}", window.length, self.now);
        aggregate_window(&events, self.now, window).into_app_err("aggregating usage events")
    }

    /// Build the filter state from the `--series` toggles, reporting keys no series matches
    pub fn filter_state(&mut self, result: &AggregationResult) -> FilterState {
        let mut state = FilterState::new();
        for key in &self.series {
            if !result.registry.contains(key) {
                log::warn!("series '{key}' does not match any recorded endpoint");
                let _ = writeln!(self.host.error(), "Series '{key}' does not match any recorded endpoint");
            }
            state.activate(SeriesKey::from(key.as_str()));
        }

        state
    }
}

/// Resolve the color mode against the terminal that will receive the output
pub fn use_colors(color: ColorMode) -> bool {
    match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            use std::io::{IsTerminal, stdout};
            stdout().is_terminal()
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let env = env_logger::Env::default().filter_or("RUST_LOG", log_level.to_string());

    // A logger may already be installed when commands run more than once in one process.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
