//! # Logging Utilities
//!
//! Logging infrastructure for Lens using `tracing`.
//!
//! The engine is a library that runs embedded in a debugger host, and the
//! host's stdout/stderr usually carry its own UI or wire protocol. Logging
//! therefore comes in two modes:
//!
//! - **Host mode** ([`init_host_logging`]): file-only, never touches the
//!   console. Returns a [`HostLogGuard`] the host keeps for the session;
//!   dropping it flushes buffered lines.
//! - **Console mode** ([`init_console_logging`]): stdout logging for
//!   development runs and tools that own their terminal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lens_utils::{init_host_logging, LogLevel};
//!
//! // Keep the guard for the whole session; dropping it flushes the file.
//! let guard = init_host_logging(Some(LogLevel::Debug), None)
//!     .expect("Failed to initialize logging");
//! tracing::info!(path = %guard.path().display(), "engine logging to file");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: level filter when no explicit level is given
//!   (e.g. `RUST_LOG=debug`, `RUST_LOG=lens_core=trace`)
//! - `LENS_LOG_FORMAT`: console output format (`json` or `pretty`,
//!   default: `pretty`); host mode is always plain text

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::{DateTime, Utc};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default for development)
    Pretty,
    /// JSON format (default for production)
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Session handle for host-embedded logging
///
/// Holds the background writer; log lines are buffered off the inspection
/// thread and flushed when this guard is dropped. The host keeps it alive
/// for the whole debug session and drops it at detach.
pub struct HostLogGuard
{
    path: PathBuf,
    _worker: WorkerGuard,
}

impl HostLogGuard
{
    /// Path of the session's log file.
    #[must_use]
    pub fn path(&self) -> &Path
    {
        &self.path
    }
}

/// Initialize file-only logging for running embedded in a debugger host
///
/// Never writes to stdout/stderr; those belong to the host. The log file is
/// `YYYY-MM-DD-lens.log` inside `dir`, or inside `~/.lens` (falling back to
/// the system temp directory) when `dir` is `None`.
///
/// `level` takes precedence over `RUST_LOG`; with neither set the filter
/// defaults to `INFO`. `RUST_LOG` still supports module-specific filters
/// such as `lens_core=debug`.
///
/// ## Example
///
/// ```rust,no_run
/// use lens_utils::{init_host_logging, LogLevel};
///
/// let guard = init_host_logging(Some(LogLevel::Debug), None)
///     .expect("Failed to initialize logging");
/// tracing::info!("attached");
/// // ... session runs ...
/// drop(guard); // flush on detach
/// ```
///
/// ## Errors
///
/// Returns an error if the log directory or file cannot be created, or if a
/// global subscriber is already installed.
pub fn init_host_logging(level: Option<LogLevel>, dir: Option<&Path>) -> Result<HostLogGuard, LoggingError>
{
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir(),
    };
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(dated_log_file_name(Utc::now()));

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let (writer, worker) = tracing_appender::non_blocking(file);

    let filter = match level {
        Some(level) => EnvFilter::new(Level::from(level).to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
    };

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false) // No ANSI in files
        .with_filter(filter);

    Registry::default()
        .with(file_layer)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(HostLogGuard { path, _worker: worker })
}

/// Initialize stdout logging for development runs
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: level filter (default: `info`)
/// - `LENS_LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
///
/// ## Errors
///
/// Returns an error on an invalid `LENS_LOG_FORMAT` value or if a global
/// subscriber is already installed.
pub fn init_console_logging() -> Result<(), LoggingError>
{
    let format = match env::var("LENS_LOG_FORMAT") {
        Ok(raw) => raw.parse::<LogFormat>().map_err(LoggingError::InvalidFormat)?,
        Err(_) => LogFormat::Pretty,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    match format {
        LogFormat::Pretty => {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stdout)
                .with_filter(filter);
            Registry::default().with(console_layer).try_init()
        }
        LogFormat::Json => {
            let console_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stdout)
                .with_filter(filter);
            Registry::default().with(console_layer).try_init()
        }
    }
    .map_err(|err| LoggingError::InitializationFailed(err.to_string()))
}

/// `~/.lens`, or the system temp directory when HOME is not set.
fn default_log_dir() -> PathBuf
{
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".lens"),
        None => env::temp_dir(),
    }
}

/// One file per day; the date lives in the name, so no rotation is needed.
fn dated_log_file_name(now: DateTime<Utc>) -> String
{
    format!("{}-lens.log", now.format("%Y-%m-%d"))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
