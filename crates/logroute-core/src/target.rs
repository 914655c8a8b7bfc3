//! # Log Targets
//!
//! The seam between a logger and wherever records end up.
//!
//! A logger fans each admitted record out to its targets. Each target has its
//! own threshold, so one logger can send everything to memory while only
//! printing notices and above to the console.
//!
//! Targets are shared between loggers as `Arc<dyn LogTarget>` and called from
//! any thread, so implementations must be `Send + Sync` and should write each
//! record atomically.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError, RwLock};

use crate::error::{LogrouteError, LogrouteResult};
use crate::formatter::TextFormatter;
use crate::level::LogLevel;
use crate::record::LogRecord;

/// A destination for log records.
pub trait LogTarget: Send + Sync
{
    /// Name used when reporting failures.
    fn name(&self) -> &str;

    /// Least severe level this target writes.
    fn max_level(&self) -> LogLevel
    {
        LogLevel::Any
    }

    /// Write one record.
    ///
    /// ## Errors
    ///
    /// Returns an error if the underlying sink fails. The logger reports the
    /// failure and carries on with its other targets.
    fn write(&self, record: &LogRecord) -> LogrouteResult<()>;
}

/// Writes formatted records to standard error.
///
/// Defaults to [`LogLevel::Info`], so debug records are dropped until the
/// threshold is raised with [`ConsoleTarget::set_max_level`].
#[derive(Debug)]
pub struct ConsoleTarget
{
    max_level: RwLock<LogLevel>,
    formatter: TextFormatter,
}

impl Default for ConsoleTarget
{
    fn default() -> Self
    {
        Self::new(TextFormatter::default())
    }
}

impl ConsoleTarget
{
    #[must_use]
    pub fn new(formatter: TextFormatter) -> Self
    {
        Self {
            max_level: RwLock::new(LogLevel::Info),
            formatter,
        }
    }

    #[must_use]
    pub fn with_max_level(self, level: LogLevel) -> Self
    {
        self.set_max_level(level);
        self
    }

    pub fn set_max_level(&self, level: LogLevel)
    {
        *self.max_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }
}

impl LogTarget for ConsoleTarget
{
    fn name(&self) -> &str
    {
        "console"
    }

    fn max_level(&self) -> LogLevel
    {
        *self.max_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, record: &LogRecord) -> LogrouteResult<()>
    {
        let mut line = self.formatter.format(record);
        line.push('\n');
        // One write call per record keeps lines from interleaving.
        io::stderr().lock().write_all(line.as_bytes()).map_err(|source| LogrouteError::TargetWrite {
            target: self.name().to_string(),
            source,
        })
    }
}

/// Keeps every record it receives in memory.
#[derive(Debug)]
pub struct MemoryTarget
{
    max_level: LogLevel,
    records: Mutex<Vec<LogRecord>>,
}

impl Default for MemoryTarget
{
    fn default() -> Self
    {
        Self::new(LogLevel::Any)
    }
}

impl MemoryTarget
{
    #[must_use]
    pub fn new(max_level: LogLevel) -> Self
    {
        Self {
            max_level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every record received so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord>
    {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return every record received so far.
    pub fn drain(&self) -> Vec<LogRecord>
    {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize
    {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}

impl LogTarget for MemoryTarget
{
    fn name(&self) -> &str
    {
        "memory"
    }

    fn max_level(&self) -> LogLevel
    {
        self.max_level
    }

    fn write(&self, record: &LogRecord) -> LogrouteResult<()>
    {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
        Ok(())
    }
}
