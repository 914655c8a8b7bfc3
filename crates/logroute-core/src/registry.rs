//! # Logger Registry
//!
//! Maps logger names to shared [`Logger`] handles.
//!
//! Lookups are case-sensitive exact matches. Asking for an unknown name creates,
//! registers and returns a new logger configured with the registry defaults; the
//! get-or-insert is a single atomic [`DashMap`] entry operation, so two threads
//! asking for the same new name always end up with the same logger.
//!
//! A process-wide registry is reachable through [`registry()`]. Independent
//! registries can be created with [`LoggerRegistry::new`], which is what tests
//! and embedders that want isolation use.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::dispatch::LogRequest;
use crate::error::{LogrouteError, LogrouteResult};
use crate::level::LogLevel;
use crate::logger::{Logger, LoggerConfig};
use crate::target::{ConsoleTarget, LogTarget};

/// Reserved name of the application logger.
pub const APPLICATION_LOGGER_NAME: &str = "application";

static GLOBAL_REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::with_console);

/// The process-wide registry.
///
/// Starts out with a single [`ConsoleTarget`] as default target; call
/// [`LoggerRegistry::set_default_targets`] before the first lookup to change
/// what new loggers write to.
pub fn registry() -> &'static LoggerRegistry
{
    &GLOBAL_REGISTRY
}

/// The process-wide application logger.
#[must_use]
pub fn application_logger() -> Logger
{
    registry().application_logger()
}

/// The process-wide logger called `name`, created on first use.
#[must_use]
pub fn logger(name: &str) -> Logger
{
    registry().logger(name)
}

/// Route `request` through the process-wide registry.
pub fn dispatch(request: LogRequest)
{
    registry().dispatch(request);
}

/// Name → logger map plus the configuration given to new loggers.
pub struct LoggerRegistry
{
    loggers: DashMap<String, Logger>,
    defaults: RwLock<LoggerConfig>,
}

impl Default for LoggerRegistry
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerRegistry
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .field("defaults", &*self.defaults.read().unwrap_or_else(PoisonError::into_inner))
            .finish()
    }
}

impl LoggerRegistry
{
    /// An empty registry whose new loggers admit every level and have no targets.
    #[must_use]
    pub fn new() -> Self
    {
        Self::with_defaults(LoggerConfig::default())
    }

    /// An empty registry whose new loggers start from `defaults`.
    #[must_use]
    pub fn with_defaults(defaults: LoggerConfig) -> Self
    {
        Self {
            loggers: DashMap::new(),
            defaults: RwLock::new(defaults),
        }
    }

    fn with_console() -> Self
    {
        let console: Arc<dyn LogTarget> = Arc::new(ConsoleTarget::default());
        Self::with_defaults(LoggerConfig::new(LogLevel::Any, vec![console]))
    }

    /// The application logger. Always the same instance for this registry.
    #[must_use]
    pub fn application_logger(&self) -> Logger
    {
        self.logger(APPLICATION_LOGGER_NAME)
    }

    /// The logger called `name`, created with the default configuration if
    /// it does not exist yet.
    #[must_use]
    pub fn logger(&self, name: &str) -> Logger
    {
        if let Some(existing) = self.loggers.get(name) {
            return Logger::clone(&existing);
        }
        match self.loggers.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let logger = Logger::with_config(name, self.default_config());
                tracing::debug!(logger = %name, "Created logger");
                Logger::clone(&entry.insert(logger))
            }
        }
    }

    /// The logger called `name`, without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Logger>
    {
        self.loggers.get(name).map(|logger| Logger::clone(&logger))
    }

    /// Names of every registered logger, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String>
    {
        let mut names: Vec<String> = self.loggers.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Register `logger` under its name, replacing and returning any logger
    /// registered there before.
    ///
    /// ## Errors
    ///
    /// Returns [`LogrouteError::ReservedLoggerName`] for the application
    /// logger's name, which cannot be replaced.
    pub fn register(&self, logger: Logger) -> LogrouteResult<Option<Logger>>
    {
        if logger.name() == APPLICATION_LOGGER_NAME {
            return Err(LogrouteError::ReservedLoggerName(APPLICATION_LOGGER_NAME.to_string()));
        }
        Ok(self.loggers.insert(logger.name().to_string(), logger))
    }

    /// Targets given to loggers created from now on.
    pub fn set_default_targets(&self, targets: Vec<Arc<dyn LogTarget>>)
    {
        self.defaults.write().unwrap_or_else(PoisonError::into_inner).targets = targets;
    }

    /// Maximum level given to loggers created from now on.
    pub fn set_default_max_level(&self, level: LogLevel)
    {
        self.defaults.write().unwrap_or_else(PoisonError::into_inner).max_level = level;
    }

    /// Configuration given to new loggers.
    #[must_use]
    pub fn default_config(&self) -> LoggerConfig
    {
        self.defaults.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Route `request` to its named logger, or to the application logger when
    /// it names none.
    pub fn dispatch(&self, request: LogRequest)
    {
        let logger = match request.target_logger() {
            Some(name) => self.logger(name),
            None => self.application_logger(),
        };
        request.emit_to(&logger);
    }
}
