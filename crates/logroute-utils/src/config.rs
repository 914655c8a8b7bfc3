//! # Routing Configuration
//!
//! Logger thresholds read from the environment.
//!
//! ## Environment Variables
//!
//! - `LOGROUTE_LEVEL`: Default max level for every logger (e.g. `notice`)
//! - `LOGROUTE_LOGGERS`: Per-logger max levels, `name=level` pairs separated by
//!   commas (e.g. `payments=debug,audit=warning`)
//!
//! Level names are the ones [`LogLevel`] parses: `off`, `alert`, `error`,
//! `warning`, `notice`, `info`, `debug`, `any`.
//!
//! ## Example
//!
//! ```rust
//! use logroute_core::level::LogLevel;
//! use logroute_core::registry::LoggerRegistry;
//! use logroute_utils::config::RoutingConfig;
//!
//! let config = RoutingConfig::from_lookup(|key| match key {
//!     "LOGROUTE_LOGGERS" => Some("payments=debug".to_string()),
//!     _ => None,
//! })
//! .expect("valid configuration");
//!
//! let registry = LoggerRegistry::new();
//! config.apply(&registry);
//! assert_eq!(registry.logger("payments").max_level(), LogLevel::Debug);
//! ```

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use logroute_core::level::LogLevel;
use logroute_core::registry::{registry, LoggerRegistry};

use crate::logging::{init_logging, LoggingError};
use crate::tracing_target::TracingTarget;

/// Default level environment variable
pub const LEVEL_ENV: &str = "LOGROUTE_LEVEL";
/// Per-logger levels environment variable
pub const LOGGERS_ENV: &str = "LOGROUTE_LOGGERS";

/// Threshold settings for a [`LoggerRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingConfig
{
    /// Max level for loggers without their own setting
    pub default_level: Option<LogLevel>,
    /// Max level per logger name
    pub logger_levels: BTreeMap<String, LogLevel>,
}

impl RoutingConfig
{
    /// Read `LOGROUTE_LEVEL` and `LOGROUTE_LOGGERS` from the process environment.
    ///
    /// ## Errors
    ///
    /// Returns an error if either variable holds an unknown level or a
    /// malformed entry.
    pub fn from_env() -> Result<Self, LoggingError>
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to its value.
    ///
    /// Unset and blank variables leave the matching setting empty.
    ///
    /// ## Errors
    ///
    /// Returns an error if either variable holds an unknown level or a
    /// malformed entry.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(LEVEL_ENV).filter(|value| !value.trim().is_empty()) {
            config.default_level = Some(parse_level(&level)?);
        }
        if let Some(loggers) = lookup(LOGGERS_ENV) {
            config.logger_levels = parse_logger_levels(&loggers)?;
        }

        Ok(config)
    }

    /// `true` when applying would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.default_level.is_none() && self.logger_levels.is_empty()
    }

    /// Apply the thresholds to `registry`.
    ///
    /// The default level becomes the registry default for new loggers and is
    /// set on every existing logger without its own entry. Named entries are
    /// set on their loggers, creating them if needed.
    pub fn apply(&self, registry: &LoggerRegistry)
    {
        if let Some(level) = self.default_level {
            registry.set_default_max_level(level);
            for name in registry.names() {
                if self.logger_levels.contains_key(&name) {
                    continue;
                }
                if let Some(logger) = registry.get(&name) {
                    logger.set_max_level(level);
                }
            }
            tracing::debug!(%level, "Applied default logger level");
        }

        for (name, level) in &self.logger_levels {
            registry.logger(name).set_max_level(*level);
            tracing::debug!(logger = %name, %level, "Applied logger level");
        }
    }
}

/// Set up logroute for the current process.
///
/// Initializes `tracing` through [`init_logging`], makes a [`TracingTarget`]
/// the default target of the process-wide registry, then applies
/// [`RoutingConfig::from_env`]. Call it before the first log call: loggers that
/// already exist keep their targets.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the environment
/// holds invalid settings.
pub fn install() -> Result<RoutingConfig, LoggingError>
{
    init_logging()?;
    let config = RoutingConfig::from_env()?;

    let registry = registry();
    registry.set_default_targets(vec![Arc::new(TracingTarget::default())]);
    config.apply(registry);

    tracing::info!(loggers = config.logger_levels.len(), "logroute installed");
    Ok(config)
}

fn parse_level(value: &str) -> Result<LogLevel, LoggingError>
{
    value.trim().parse().map_err(|_| LoggingError::InvalidLevel(value.trim().to_string()))
}

fn parse_logger_levels(value: &str) -> Result<BTreeMap<String, LogLevel>, LoggingError>
{
    let mut levels = BTreeMap::new();
    for entry in value.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let Some((name, level)) = entry.split_once('=') else {
            return Err(LoggingError::InvalidLoggerSetting(entry.to_string()));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(LoggingError::InvalidLoggerSetting(entry.to_string()));
        }
        levels.insert(name.to_string(), parse_level(level)?);
    }
    Ok(levels)
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String>
    {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment()
    {
        let config = RoutingConfig::from_lookup(lookup_from(&[])).unwrap();

        assert!(config.is_empty());
        assert_eq!(config, RoutingConfig::default());
    }

    #[test]
    fn test_parse_default_and_logger_levels()
    {
        let config = RoutingConfig::from_lookup(lookup_from(&[
            (LEVEL_ENV, " Notice "),
            (LOGGERS_ENV, "payments=debug, audit = warning,,"),
        ]))
        .unwrap();

        assert_eq!(config.default_level, Some(LogLevel::Notice));
        assert_eq!(config.logger_levels.len(), 2);
        assert_eq!(config.logger_levels.get("payments"), Some(&LogLevel::Debug));
        assert_eq!(config.logger_levels.get("audit"), Some(&LogLevel::Warning));
    }

    #[test]
    fn test_blank_level_is_unset()
    {
        let config = RoutingConfig::from_lookup(lookup_from(&[(LEVEL_ENV, "  ")])).unwrap();

        assert_eq!(config.default_level, None);
    }

    #[test]
    fn test_invalid_level_is_rejected()
    {
        let result = RoutingConfig::from_lookup(lookup_from(&[(LEVEL_ENV, "loud")]));
        assert!(matches!(result, Err(LoggingError::InvalidLevel(ref level)) if level == "loud"));

        let result = RoutingConfig::from_lookup(lookup_from(&[(LOGGERS_ENV, "payments=loud")]));
        assert!(matches!(result, Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn test_malformed_logger_entry_is_rejected()
    {
        let result = RoutingConfig::from_lookup(lookup_from(&[(LOGGERS_ENV, "payments")]));
        assert!(matches!(result, Err(LoggingError::InvalidLoggerSetting(ref entry)) if entry == "payments"));

        let result = RoutingConfig::from_lookup(lookup_from(&[(LOGGERS_ENV, "=debug")]));
        assert!(matches!(result, Err(LoggingError::InvalidLoggerSetting(_))));
    }

    #[test]
    fn test_apply_sets_defaults_and_named_levels()
    {
        let registry = LoggerRegistry::new();
        let existing = registry.logger("existing");
        let audit = registry.logger("audit");

        let config = RoutingConfig::from_lookup(lookup_from(&[
            (LEVEL_ENV, "warning"),
            (LOGGERS_ENV, "audit=debug,payments=error"),
        ]))
        .unwrap();
        config.apply(&registry);

        assert_eq!(existing.max_level(), LogLevel::Warning);
        assert_eq!(audit.max_level(), LogLevel::Debug);
        assert_eq!(registry.logger("payments").max_level(), LogLevel::Error);
        assert_eq!(registry.logger("created-later").max_level(), LogLevel::Warning);
    }

    #[test]
    fn test_apply_without_default_leaves_others_alone()
    {
        let registry = LoggerRegistry::new();
        let other = registry.logger("other");

        let config = RoutingConfig::from_lookup(lookup_from(&[(LOGGERS_ENV, "payments=info")])).unwrap();
        config.apply(&registry);

        assert_eq!(other.max_level(), LogLevel::Any);
        assert_eq!(registry.logger("payments").max_level(), LogLevel::Info);
    }
}
