//! # Named Loggers
//!
//! A [`Logger`] is a cheap, cloneable handle to a named routing target. All
//! clones share one configuration: a maximum level and a list of
//! [`LogTarget`]s. Configuration can change at runtime; every emission works
//! on a consistent [`LoggerConfig`] snapshot taken at the start of the call.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use logroute_core::callsite::CallSiteInfo;
//! use logroute_core::level::LogLevel;
//! use logroute_core::logger::Logger;
//! use logroute_core::target::MemoryTarget;
//!
//! let memory = Arc::new(MemoryTarget::default());
//! let logger = Logger::new("audit", LogLevel::Info, vec![memory.clone()]);
//!
//! let here = CallSiteInfo::build("main", "src/main.rs", 1, None::<&str>);
//! logger.emit(LogLevel::Notice, here.clone(), None, Some("kept".to_string()));
//! logger.emit(LogLevel::Debug, here, None, Some("suppressed".to_string()));
//!
//! assert_eq!(memory.len(), 1);
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::callsite::CallSiteInfo;
use crate::dispatch::LogRequest;
use crate::fault::NormalizedFault;
use crate::level::LogLevel;
use crate::record::LogRecord;
use crate::registry::registry;
use crate::target::LogTarget;

/// Snapshot of a logger's configuration.
#[derive(Clone)]
pub struct LoggerConfig
{
    /// Least severe level the logger emits
    pub max_level: LogLevel,
    /// Destinations, each with its own threshold
    pub targets: Vec<Arc<dyn LogTarget>>,
}

impl LoggerConfig
{
    #[must_use]
    pub fn new(max_level: LogLevel, targets: Vec<Arc<dyn LogTarget>>) -> Self
    {
        Self { max_level, targets }
    }
}

impl Default for LoggerConfig
{
    fn default() -> Self
    {
        Self::new(LogLevel::Any, Vec::new())
    }
}

impl fmt::Debug for LoggerConfig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("LoggerConfig")
            .field("max_level", &self.max_level)
            .field("targets", &self.targets.iter().map(|target| target.name()).collect::<Vec<_>>())
            .finish()
    }
}

struct LoggerInner
{
    name: String,
    config: RwLock<Arc<LoggerConfig>>,
}

/// Shared handle to a named logger.
///
/// Cloning the handle never copies the logger; use [`Logger::ptr_eq`] to test
/// whether two handles refer to the same one.
#[derive(Clone)]
pub struct Logger
{
    inner: Arc<LoggerInner>,
}

impl fmt::Debug for Logger
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("config", &*self.config())
            .finish()
    }
}

impl Logger
{
    /// Create an unregistered logger.
    ///
    /// Register it with [`LoggerRegistry::register`](crate::registry::LoggerRegistry::register)
    /// to make it reachable by name.
    #[must_use]
    pub fn new(name: impl Into<String>, max_level: LogLevel, targets: Vec<Arc<dyn LogTarget>>) -> Self
    {
        Self::with_config(name, LoggerConfig::new(max_level, targets))
    }

    #[must_use]
    pub fn with_config(name: impl Into<String>, config: LoggerConfig) -> Self
    {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                config: RwLock::new(Arc::new(config)),
            }),
        }
    }

    /// The process-wide application logger.
    #[must_use]
    pub fn application() -> Self
    {
        registry().application_logger()
    }

    /// The process-wide logger called `name`, created on first use.
    #[must_use]
    pub fn named(name: &str) -> Self
    {
        registry().logger(name)
    }

    #[must_use]
    pub fn name(&self) -> &str
    {
        &self.inner.name
    }

    /// `true` when both handles refer to the same logger.
    #[must_use]
    pub fn ptr_eq(&self, other: &Logger) -> bool
    {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Current configuration snapshot.
    #[must_use]
    pub fn config(&self) -> Arc<LoggerConfig>
    {
        Arc::clone(&self.inner.config.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn max_level(&self) -> LogLevel
    {
        self.config().max_level
    }

    pub fn set_max_level(&self, level: LogLevel)
    {
        self.update(|config| config.max_level = level);
    }

    pub fn add_target(&self, target: Arc<dyn LogTarget>)
    {
        self.update(|config| config.targets.push(target));
    }

    /// Remove `target` (compared by identity). Returns whether it was present.
    pub fn remove_target(&self, target: &Arc<dyn LogTarget>) -> bool
    {
        let mut removed = false;
        self.update(|config| {
            let before = config.targets.len();
            config.targets.retain(|existing| !Arc::ptr_eq(existing, target));
            removed = config.targets.len() != before;
        });
        removed
    }

    /// Replace the whole configuration at once.
    pub fn set_config(&self, config: LoggerConfig)
    {
        *self.inner.config.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(config);
    }

    /// Whether a record at `level` would pass this logger's threshold.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool
    {
        level.is_admitted_by(self.max_level())
    }

    /// Emit a fully resolved record.
    ///
    /// This is where every dispatch path ends. The record is dropped when
    /// `level` does not pass the logger's threshold; otherwise it goes to
    /// every target whose own threshold admits it. A failing target is
    /// reported through `tracing` and never stops the others.
    pub fn emit(&self, level: LogLevel, call_site: CallSiteInfo, fault: Option<NormalizedFault>, message: Option<String>)
    {
        let config = self.config();
        if !level.is_admitted_by(config.max_level) {
            return;
        }

        let record = LogRecord::new(level, self.name(), call_site, fault, message);
        for target in config.targets.iter().filter(|target| level.is_admitted_by(target.max_level())) {
            if let Err(error) = target.write(&record) {
                tracing::warn!(logger = %self.name(), target = %target.name(), %error, "Log target failed to write record");
            }
        }
    }

    /// Log `request` to this logger, ignoring any logger name it carries.
    pub fn log(&self, request: LogRequest)
    {
        request.emit_to(self);
    }

    /// Log `request` to the process-wide logger called `name`, or to the
    /// application logger when `name` is `None`.
    pub fn log_to(name: Option<&str>, request: LogRequest)
    {
        registry().dispatch(request.logger_name(name));
    }

    fn update(&self, change: impl FnOnce(&mut LoggerConfig))
    {
        let mut guard = self.inner.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut config = LoggerConfig::clone(&guard);
        change(&mut config);
        *guard = Arc::new(config);
    }
}
