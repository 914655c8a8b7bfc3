//! # Error Types
//!
//! General error handling for the routing layer.
//!
//! Logging itself never fails from the caller's point of view. The few operations
//! that can fail (parsing a level, registering a logger, writing to a target)
//! report through [`LogrouteError`], built with `thiserror`.

use thiserror::Error;

/// Main error type for logroute operations
///
/// ## Error Categories
///
/// 1. **Parse errors**: InvalidLevel
/// 2. **Registry errors**: ReservedLoggerName
/// 3. **Target errors**: TargetWrite, Io
#[derive(Error, Debug)]
pub enum LogrouteError
{
    /// A string could not be parsed into a [`LogLevel`](crate::level::LogLevel)
    ///
    /// Accepted names are `off`, `alert`, `error`, `warning`, `notice`, `info`,
    /// `debug` and `any` (case-insensitive), plus a few aliases.
    #[error("Unknown log level: {0}")]
    InvalidLevel(String),

    /// Attempted to replace the application logger through registration
    ///
    /// The application logger is handed out by `application_logger()` and must
    /// stay the same instance for the lifetime of the registry.
    #[error("Logger name is reserved: {0}")]
    ReservedLoggerName(String),

    /// A log target failed to write a record
    #[error("Log target '{target}' failed: {source}")]
    TargetWrite
    {
        /// Name of the failing target
        target: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, LogrouteError>`
///
/// ```rust
/// use logroute_core::error::LogrouteResult;
/// fn foo() -> LogrouteResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type LogrouteResult<T> = std::result::Result<T, LogrouteError>;
