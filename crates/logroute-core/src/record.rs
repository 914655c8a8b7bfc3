//! The record handed from a logger to its targets.

use chrono::{DateTime, Utc};

use crate::callsite::CallSiteInfo;
use crate::diagnostic::Diagnostic;
use crate::exception::ExceptionFault;
use crate::fault::NormalizedFault;
use crate::level::LogLevel;

/// One emitted log entry.
///
/// Records are only built by [`Logger::emit`](crate::logger::Logger::emit),
/// which guarantees the level is never [`LogLevel::Any`] and that at most one
/// fault kind is present.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord
{
    level: LogLevel,
    logger_name: String,
    call_site: CallSiteInfo,
    fault: Option<NormalizedFault>,
    message: Option<String>,
    timestamp: DateTime<Utc>,
}

impl LogRecord
{
    pub(crate) fn new(
        level: LogLevel,
        logger_name: &str,
        call_site: CallSiteInfo,
        fault: Option<NormalizedFault>,
        message: Option<String>,
    ) -> Self
    {
        debug_assert!(level != LogLevel::Any, "records are never emitted at LogLevel::Any");
        Self {
            level,
            logger_name: logger_name.to_string(),
            call_site,
            fault,
            message,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn level(&self) -> LogLevel
    {
        self.level
    }

    #[must_use]
    pub fn logger_name(&self) -> &str
    {
        &self.logger_name
    }

    #[must_use]
    pub fn call_site(&self) -> &CallSiteInfo
    {
        &self.call_site
    }

    /// The error diagnostic, when the record carries an error-kind fault.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic>
    {
        match &self.fault {
            Some(NormalizedFault::Error(diagnostic)) => Some(diagnostic),
            _ => None,
        }
    }

    /// The exception, when the record carries an exception-kind fault.
    #[must_use]
    pub fn exception(&self) -> Option<&ExceptionFault>
    {
        match &self.fault {
            Some(NormalizedFault::Exception(exception)) => Some(exception),
            _ => None,
        }
    }

    #[must_use]
    pub fn fault(&self) -> Option<&NormalizedFault>
    {
        self.fault.as_ref()
    }

    /// The rendered message. `None` when the call had no format at all,
    /// which is distinct from a format that rendered to `""`.
    #[must_use]
    pub fn message(&self) -> Option<&str>
    {
        self.message.as_deref()
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc>
    {
        self.timestamp
    }
}
