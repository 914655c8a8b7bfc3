//! # Exception Faults
//!
//! The raised/thrown kind of fault. In Rust that is a panic: an
//! [`ExceptionFault`] can be built by hand, from a panic payload, or by running
//! a closure under [`ExceptionFault::probe`].
//!
//! Exceptions travel through the same pipeline as errors but are kept apart
//! from [`Diagnostic`](crate::diagnostic::Diagnostic): they infer a higher
//! level (`Alert`) and carry a call stack instead of a domain and code.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Name given to exceptions captured from a panic.
pub const PANIC_EXCEPTION_NAME: &str = "panic";

/// A raised fault: name, reason, call stack and an optional cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionFault
{
    name: String,
    reason: Option<String>,
    call_stack: Vec<String>,
    cause: Option<Box<ExceptionFault>>,
    user_info: BTreeMap<String, String>,
}

impl ExceptionFault
{
    /// Create an exception with a name and no other data.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self
    {
        Self {
            name: name.into(),
            reason: None,
            call_stack: Vec::new(),
            cause: None,
            user_info: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self
    {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ExceptionFault) -> Self
    {
        self.cause = Some(Box::new(cause));
        self
    }

    #[must_use]
    pub fn with_call_stack<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call_stack = frames.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_user_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self
    {
        self.user_info.insert(key.into(), value.into());
        self
    }

    /// Attach the current backtrace as call stack.
    ///
    /// Follows `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`; when capture is
    /// disabled the call stack stays empty.
    #[must_use]
    pub fn with_captured_backtrace(mut self) -> Self
    {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.call_stack = backtrace.to_string().lines().map(|line| line.trim_end().to_string()).collect();
        }
        self
    }

    /// Build an exception from a panic payload as returned by `catch_unwind`.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self
    {
        let reason = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new(PANIC_EXCEPTION_NAME).with_reason(reason).with_captured_backtrace()
    }

    /// Run `body`, returning the panic it raised as an exception, if any.
    ///
    /// The default panic hook still runs and prints to stderr.
    ///
    /// ```rust
    /// use logroute_core::exception::ExceptionFault;
    ///
    /// let caught = ExceptionFault::probe(|| panic!("boom"));
    /// assert_eq!(caught.and_then(|e| e.reason().map(str::to_owned)).as_deref(), Some("boom"));
    /// assert!(ExceptionFault::probe(|| ()).is_none());
    /// ```
    pub fn probe<F>(body: F) -> Option<Self>
    where
        F: FnOnce(),
    {
        panic::catch_unwind(AssertUnwindSafe(body)).err().map(|payload| Self::from_panic(payload.as_ref()))
    }

    #[must_use]
    pub fn name(&self) -> &str
    {
        &self.name
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str>
    {
        self.reason.as_deref()
    }

    #[must_use]
    pub fn call_stack(&self) -> &[String]
    {
        &self.call_stack
    }

    #[must_use]
    pub fn cause(&self) -> Option<&ExceptionFault>
    {
        self.cause.as_deref()
    }

    #[must_use]
    pub fn user_info(&self) -> &BTreeMap<String, String>
    {
        &self.user_info
    }

    /// Iterate this exception followed by each cause.
    pub fn chain(&self) -> impl Iterator<Item = &ExceptionFault>
    {
        std::iter::successors(Some(self), |exception| exception.cause())
    }

    /// `name: reason`, optionally followed by the call stack.
    #[must_use]
    pub fn log_info(&self, include_symbols: bool) -> String
    {
        let mut info = match &self.reason {
            Some(reason) => format!("{}: {}", self.name, reason),
            None => self.name.clone(),
        };
        if include_symbols {
            for frame in &self.call_stack {
                info.push('\n');
                info.push_str(frame);
            }
        }
        info
    }

    /// This exception and every cause, one `log_info` block each.
    #[must_use]
    pub fn log_trace(&self, include_symbols: bool) -> String
    {
        self.chain().map(|exception| exception.log_info(include_symbols)).collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for ExceptionFault
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.log_info(false))
    }
}
