//! # Logging Utilities
//!
//! Host-side `tracing` setup for processes that use logroute.
//!
//! logroute itself reports internal events (logger creation, failing targets)
//! through `tracing`, and [`TracingTarget`](crate::tracing_target::TracingTarget)
//! forwards routed records there too. This module installs the subscriber that
//! receives all of it:
//! - Pretty or JSON output on stderr
//! - Optional daily-rolling log file
//! - Filtering through `RUST_LOG`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logroute_utils::init_logging;
//!
//! // Initialize with default settings (reads from RUST_LOG env var)
//! init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=logroute_core=debug`)
//! - `LOGROUTE_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `LOGROUTE_LOG_FILE`: Optional path to log file (if not set, logs only to console)
//!
//! ## Examples
//!
//! ```rust,no_run
//! use logroute_core::level::LogLevel;
//! use logroute_utils::{LogFormat, init_logging_with_level};
//!
//! // Everything down to DEBUG, as JSON
//! init_logging_with_level(LogLevel::Debug, LogFormat::Json).expect("Failed to initialize logging");
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use logroute_core::level::LogLevel;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Output format environment variable
pub const LOG_FORMAT_ENV: &str = "LOGROUTE_LOG_FORMAT";
/// Log file environment variable
pub const LOG_FILE_ENV: &str = "LOGROUTE_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default for development)
    #[default]
    Pretty,
    /// JSON format (default for production)
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

/// The `tracing` level a logroute level is reported at.
///
/// `tracing` has five levels to logroute's six emittable ones, so `Alert`
/// shares `ERROR` and `Notice` shares `INFO`. [`LogLevel::Off`] has no
/// counterpart; [`LogLevel::Any`] maps to `TRACE` so that, used as a
/// threshold, it lets everything through.
#[must_use]
pub fn tracing_level(level: LogLevel) -> Option<Level>
{
    match level {
        LogLevel::Off => None,
        LogLevel::Alert | LogLevel::Error => Some(Level::ERROR),
        LogLevel::Warning => Some(Level::WARN),
        LogLevel::Notice | LogLevel::Info => Some(Level::INFO),
        LogLevel::Debug => Some(Level::DEBUG),
        LogLevel::Any => Some(Level::TRACE),
    }
}

/// Initialize logging with default settings
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `logroute_core=debug`)
/// - `LOGROUTE_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
/// - `LOGROUTE_LOG_FILE`: Optional path to log file
///
/// ## Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - `LOGROUTE_LOG_FORMAT` holds an unknown format
/// - File logging fails (if `LOGROUTE_LOG_FILE` is set)
pub fn init_logging() -> Result<(), LoggingError>
{
    let format = match env::var(LOG_FORMAT_ENV) {
        Ok(value) => value.parse()?,
        Err(_) => LogFormat::Pretty,
    };

    // RUST_LOG can override the default level with more specific filters
    let directives = env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| EnvFilter::try_new(value).is_ok())
        .unwrap_or_else(|| Level::INFO.to_string());
    init_logging_internal(format, &directives)
}

/// Initialize logging with explicit level and format
///
/// `level` is a logroute level, translated with [`tracing_level`];
/// [`LogLevel::Off`] turns console and file output off entirely.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<(), LoggingError>
{
    let filter = tracing_level(level).map_or(LevelFilter::OFF, LevelFilter::from_level);
    init_logging_internal(format, &filter.to_string())
}

/// Install the subscriber. Each layer gets its own filter built from `directives`.
fn init_logging_internal(format: LogFormat, directives: &str) -> Result<(), LoggingError>
{
    let log_file = env::var(LOG_FILE_ENV).ok().map(PathBuf::from);

    let mut layers = vec![console_layer(format, EnvFilter::new(directives))];
    if let Some(file_path) = log_file {
        layers.push(file_layer(format, &file_path, EnvFilter::new(directives))?);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|error| LoggingError::InitializationFailed(error.to_string()))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, file_path: &Path, filter: EnvFilter) -> Result<BoxedLayer, LoggingError>
{
    let directory = file_path.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = file_path
        .file_name()
        .ok_or_else(|| LoggingError::FileError(io::Error::new(io::ErrorKind::InvalidInput, "log file path has no file name")))?;
    std::fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; logging lasts for the rest of the process.
    std::mem::forget(guard);

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false); // No ANSI in files

    Ok(match format {
        LogFormat::Pretty => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    })
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Malformed `name=level` entry
    #[error("Invalid logger setting: {0}")]
    InvalidLoggerSetting(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("dev").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str(" PROD ").unwrap(), LogFormat::Json);
        assert!(matches!(LogFormat::from_str("invalid"), Err(LoggingError::InvalidFormat(_))));
    }

    #[test]
    fn test_default_format_is_pretty()
    {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(tracing_level(LogLevel::Off), None);
        assert_eq!(tracing_level(LogLevel::Alert), Some(Level::ERROR));
        assert_eq!(tracing_level(LogLevel::Error), Some(Level::ERROR));
        assert_eq!(tracing_level(LogLevel::Warning), Some(Level::WARN));
        assert_eq!(tracing_level(LogLevel::Notice), Some(Level::INFO));
        assert_eq!(tracing_level(LogLevel::Info), Some(Level::INFO));
        assert_eq!(tracing_level(LogLevel::Debug), Some(Level::DEBUG));
        assert_eq!(tracing_level(LogLevel::Any), Some(Level::TRACE));
    }

    #[test]
    fn test_tracing_level_keeps_severity_order()
    {
        let mapped: Vec<Level> = LogLevel::ALL.iter().filter_map(|level| tracing_level(*level)).collect();

        // tracing orders TRACE > DEBUG > ... > ERROR, the same direction as LogLevel
        assert!(mapped.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
