//! # Log Dispatcher
//!
//! [`LogRequest`] gathers everything a log call can carry: an optional level,
//! an optional logger name, at most one fault, fault enrichment, an optional
//! message and the call site. Every call shape ends in
//! [`LogRequest::emit_to`], which resolves the level, normalizes the fault,
//! renders the message and hands the result to [`Logger::emit`].
//!
//! ## Call shapes
//!
//! - [`dispatch`](crate::registry::dispatch) / [`LoggerRegistry::dispatch`](crate::registry::LoggerRegistry::dispatch):
//!   route by the request's logger name, or to the application logger
//! - [`Logger::log`] and [`Logger::log_to`]: route to a known logger or by name
//! - the [`log!`](crate::log), [`log_error!`](crate::log_error) and
//!   [`log_exception!`](crate::log_exception) macros, which capture the call site
//!
//! ## Example
//!
//! ```rust
//! use logroute_core::call_site;
//! use logroute_core::dispatch::LogRequest;
//! use logroute_core::level::LogLevel;
//! use logroute_core::registry::LoggerRegistry;
//!
//! let registry = LoggerRegistry::new();
//! registry.dispatch(
//!     LogRequest::new(call_site!())
//!         .level(LogLevel::Notice)
//!         .format("user %s logged in", ["alice"]),
//! );
//! ```

use crate::callsite::CallSiteInfo;
use crate::diagnostic::{Diagnostic, Enrichment};
use crate::exception::ExceptionFault;
use crate::fault::Fault;
use crate::format::{render, FormatArg};
use crate::level::{resolve_level, LogLevel};
use crate::logger::Logger;

/// Where the message of a request comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageSource
{
    /// printf-style format plus arguments, rendered at emission
    Format
    {
        format: String,
        args: Vec<FormatArg>,
    },
    /// Text that is already final and is never re-parsed
    Rendered(String),
}

impl MessageSource
{
    fn render(self) -> String
    {
        match self {
            MessageSource::Format { format, args } => render(&format, &args),
            MessageSource::Rendered(text) => text,
        }
    }
}

/// Options for a single log call.
///
/// Only the call site is required. The level defaults to [`LogLevel::Any`]
/// (infer), the logger to the application logger, and the fault and message
/// to absent.
///
/// A request holds one fault. When both an error and an exception are given,
/// the exception wins regardless of call order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRequest
{
    level: LogLevel,
    logger: Option<String>,
    fault: Option<Fault>,
    enrichment: Enrichment,
    message: Option<MessageSource>,
    call_site: CallSiteInfo,
}

impl LogRequest
{
    #[must_use]
    pub fn new(call_site: CallSiteInfo) -> Self
    {
        Self {
            level: LogLevel::Any,
            logger: None,
            fault: None,
            enrichment: Enrichment::default(),
            message: None,
            call_site,
        }
    }

    /// Log at `level`; [`LogLevel::Any`] asks for inference.
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self
    {
        self.level = level;
        self
    }

    /// Route to the logger called `name`.
    #[must_use]
    pub fn logger(mut self, name: impl Into<String>) -> Self
    {
        self.logger = Some(name.into());
        self
    }

    /// Route to `name`, or to the application logger when `None`.
    #[must_use]
    pub fn logger_name(mut self, name: Option<&str>) -> Self
    {
        self.logger = name.map(str::to_string);
        self
    }

    /// Attach an error-kind fault. Ignored when an exception is already attached.
    #[must_use]
    pub fn error(mut self, fault: impl Into<Fault>) -> Self
    {
        let fault = fault.into();
        if fault.is_exception() {
            self.fault = Some(fault);
        } else if !self.fault.as_ref().is_some_and(Fault::is_exception) {
            self.fault = Some(fault);
        }
        self
    }

    /// Attach a `std::error::Error`, keeping its source chain.
    ///
    /// The diagnostic domain is the error's static type name. A boxed error
    /// passed as `&*boxed` reports the trait object's name instead; attach
    /// `OpaqueFault::from_error(..).with_type_name(..)` through
    /// [`LogRequest::error`] to choose the domain.
    #[must_use]
    pub fn std_error<E>(self, error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.error(Fault::from_error(error))
    }

    /// Attach an exception, replacing any error.
    #[must_use]
    pub fn exception(mut self, exception: ExceptionFault) -> Self
    {
        self.fault = Some(Fault::Exception(exception));
        self
    }

    /// Failure reason overlaid onto the error diagnostic.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self
    {
        self.enrichment.reason = Some(reason.into());
        self
    }

    /// Recovery suggestion overlaid onto the error diagnostic.
    #[must_use]
    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self
    {
        self.enrichment.suggestion = Some(suggestion.into());
        self
    }

    /// Underlying cause overlaid onto the error diagnostic.
    #[must_use]
    pub fn underlying_cause(mut self, cause: Diagnostic) -> Self
    {
        self.enrichment.underlying_cause = Some(cause);
        self
    }

    /// printf-style message, rendered with `args` at emission.
    #[must_use]
    pub fn format<I, A>(mut self, format: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<FormatArg>,
    {
        self.message = Some(MessageSource::Format {
            format: format.into(),
            args: args.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Message that is already rendered.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self
    {
        self.message = Some(MessageSource::Rendered(message.into()));
        self
    }

    /// Name of the logger this request is routed to, if any.
    #[must_use]
    pub fn target_logger(&self) -> Option<&str>
    {
        self.logger.as_deref()
    }

    #[must_use]
    pub fn call_site(&self) -> &CallSiteInfo
    {
        &self.call_site
    }

    /// The level this request would be logged at.
    #[must_use]
    pub fn resolved_level(&self) -> LogLevel
    {
        let has_error = self.fault.as_ref().is_some_and(Fault::is_error);
        let has_exception = self.fault.as_ref().is_some_and(Fault::is_exception);
        resolve_level(self.level, self.message.is_some(), has_error, has_exception)
    }

    /// Resolve, normalize and render, then emit to `logger`.
    ///
    /// The logger decides whether the record is suppressed; nothing is
    /// filtered here.
    pub fn emit_to(self, logger: &Logger)
    {
        let level = self.resolved_level();
        let enrichment = self.enrichment;
        let fault = self.fault.map(|fault| fault.normalize(enrichment));
        let message = self.message.map(MessageSource::render);
        logger.emit(level, self.call_site, fault, message);
    }
}

/// Log a message to the application logger, or to a named one with `to:`.
///
/// The message uses Rust formatting. Omit it for a bare call, which infers
/// [`LogLevel::Debug`](crate::level::LogLevel::Debug).
///
/// ```rust
/// use logroute_core::level::LogLevel;
/// use logroute_core::log;
///
/// let user = "alice";
/// log!(LogLevel::Notice, "user {user} logged in");
/// log!(to: "payments", LogLevel::Any, "charged {} cents", 1250);
/// log!(LogLevel::Any);
/// ```
#[macro_export]
macro_rules! log {
    (to: $logger:expr, $level:expr $(,)?) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!()).logger($logger).level($level),
        )
    };
    (to: $logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .logger($logger)
                .level($level)
                .message(::std::format!($($arg)+)),
        )
    };
    ($level:expr $(,)?) => {
        $crate::registry::dispatch($crate::dispatch::LogRequest::new($crate::call_site!()).level($level))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .level($level)
                .message(::std::format!($($arg)+)),
        )
    };
}

/// Log an error-kind fault (anything `Into<Fault>`), with an optional message.
///
/// ```rust
/// use logroute_core::diagnostic::Diagnostic;
/// use logroute_core::level::LogLevel;
/// use logroute_core::log_error;
///
/// let failure = Diagnostic::new("net", 7, "connection reset");
/// log_error!(to: "payments", LogLevel::Any, failure.clone());
/// log_error!(LogLevel::Warning, failure, "retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! log_error {
    (to: $logger:expr, $level:expr, $fault:expr $(,)?) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!()).logger($logger).level($level).error($fault),
        )
    };
    (to: $logger:expr, $level:expr, $fault:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .logger($logger)
                .level($level)
                .error($fault)
                .message(::std::format!($($arg)+)),
        )
    };
    ($level:expr, $fault:expr $(,)?) => {
        $crate::registry::dispatch($crate::dispatch::LogRequest::new($crate::call_site!()).level($level).error($fault))
    };
    ($level:expr, $fault:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .level($level)
                .error($fault)
                .message(::std::format!($($arg)+)),
        )
    };
}

/// Log an [`ExceptionFault`](crate::exception::ExceptionFault), with an optional message.
///
/// ```rust
/// use logroute_core::exception::ExceptionFault;
/// use logroute_core::level::LogLevel;
/// use logroute_core::log_exception;
///
/// if let Some(panic) = ExceptionFault::probe(|| panic!("index out of range")) {
///     log_exception!(LogLevel::Any, panic, "worker crashed");
/// }
/// ```
#[macro_export]
macro_rules! log_exception {
    (to: $logger:expr, $level:expr, $exception:expr $(,)?) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .logger($logger)
                .level($level)
                .exception($exception),
        )
    };
    (to: $logger:expr, $level:expr, $exception:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .logger($logger)
                .level($level)
                .exception($exception)
                .message(::std::format!($($arg)+)),
        )
    };
    ($level:expr, $exception:expr $(,)?) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!()).level($level).exception($exception),
        )
    };
    ($level:expr, $exception:expr, $($arg:tt)+) => {
        $crate::registry::dispatch(
            $crate::dispatch::LogRequest::new($crate::call_site!())
                .level($level)
                .exception($exception)
                .message(::std::format!($($arg)+)),
        )
    };
}
