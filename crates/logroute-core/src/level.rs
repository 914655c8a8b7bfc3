//! # Log Levels
//!
//! Severity levels and implicit level inference.
//!
//! Levels are declared in severity order: `Off` is the most restrictive value,
//! `Any` the least. This lets a threshold check be a plain comparison:
//! a record at `level` passes a threshold `max` when `level <= max`.

use std::fmt;
use std::str::FromStr;

use crate::error::LogrouteError;

/// Severity of a log record.
///
/// `Any` is a sentinel meaning "infer the level for me" when passed to a log
/// call, and "admit every level" when used as a threshold. A record is never
/// emitted at `Any` (see [`resolve_level`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel
{
    /// Threshold that switches logging off
    Off,
    /// A serious failure in a key component
    Alert,
    /// Something has failed
    Error,
    /// Something might fail
    Warning,
    /// Something of moderate interest to the user or administrator
    Notice,
    /// Information for the developer
    Info,
    /// Only of interest to the developer in special cases
    Debug,
    /// Infer the level (as a request) or admit everything (as a threshold)
    #[default]
    Any,
}

impl LogLevel
{
    /// Every level, from `Off` to `Any`.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Off,
        LogLevel::Alert,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Any,
    ];

    /// Upper-case name used by formatters.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Alert => "ALERT",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Any => "ANY",
        }
    }

    /// Whether a record at `self` passes the threshold `max`.
    ///
    /// `Off` and `Any` are never admitted as record levels.
    #[must_use]
    pub fn is_admitted_by(self, max: LogLevel) -> bool
    {
        !matches!(self, LogLevel::Off | LogLevel::Any) && self <= max
    }
}

impl fmt::Display for LogLevel
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel
{
    type Err = LogrouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "alert" => Ok(LogLevel::Alert),
            "error" | "err" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "any" | "all" => Ok(LogLevel::Any),
            _ => Err(LogrouteError::InvalidLevel(s.to_string())),
        }
    }
}

/// Compute the level a call is logged at.
///
/// An explicit level always wins. When `requested` is [`LogLevel::Any`] the
/// level is inferred from what the call carries, in this order:
///
/// 1. an exception fault → [`LogLevel::Alert`]
/// 2. an error diagnostic → [`LogLevel::Error`]
/// 3. a format message, even one rendering to `""` → [`LogLevel::Notice`]
/// 4. nothing at all → [`LogLevel::Debug`]
///
/// ## Example
///
/// ```rust
/// use logroute_core::level::{resolve_level, LogLevel};
///
/// assert_eq!(resolve_level(LogLevel::Any, true, false, false), LogLevel::Notice);
/// assert_eq!(resolve_level(LogLevel::Warning, true, true, true), LogLevel::Warning);
/// ```
#[must_use]
pub fn resolve_level(requested: LogLevel, has_format_message: bool, has_error: bool, has_exception: bool) -> LogLevel
{
    if requested != LogLevel::Any {
        return requested;
    }
    if has_exception {
        LogLevel::Alert
    } else if has_error {
        LogLevel::Error
    } else if has_format_message {
        LogLevel::Notice
    } else {
        LogLevel::Debug
    }
}
