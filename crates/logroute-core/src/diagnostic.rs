//! # Diagnostics
//!
//! The uniform record an error-kind fault is normalized into before it reaches
//! a logger.
//!
//! A [`Diagnostic`] carries a domain, a numeric code, a message and an ordered
//! context map. Three context keys are reserved for enrichment supplied at the
//! log call: [`FAILURE_REASON_KEY`], [`RECOVERY_SUGGESTION_KEY`] and
//! [`UNDERLYING_CAUSE_KEY`]. The underlying cause is itself a `Diagnostic`,
//! owned through a `Box`, so cause chains are always finite and acyclic.
//!
//! ## Normalization
//!
//! ```rust
//! use logroute_core::diagnostic::{normalize, Diagnostic, Enrichment, ErrorFault};
//!
//! let fault = ErrorFault::Structured(Diagnostic::new("net", 7, "connection reset").with_context("retry", "2"));
//! let diagnostic = normalize(fault, Enrichment::new().reason("peer closed the socket"));
//!
//! assert_eq!(diagnostic.domain(), "net");
//! assert_eq!(diagnostic.failure_reason(), Some("peer closed the socket"));
//! ```

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// Context key holding the caller-supplied failure reason.
pub const FAILURE_REASON_KEY: &str = "failure-reason";
/// Context key holding the caller-supplied recovery suggestion.
pub const RECOVERY_SUGGESTION_KEY: &str = "recovery-suggestion";
/// Context key holding the nested underlying-cause diagnostic.
pub const UNDERLYING_CAUSE_KEY: &str = "underlying-cause";

/// Code given to diagnostics synthesized from opaque faults.
pub const OPAQUE_FAULT_CODE: i64 = 0;
/// Domain given to diagnostics synthesized from an error's `source()` chain.
pub const ERROR_SOURCE_DOMAIN: &str = "error-source";
/// Deepest `source()` chain turned into underlying causes.
pub const MAX_SOURCE_DEPTH: usize = 16;

/// A value stored in a diagnostic's context map.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue
{
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Diagnostic(Box<Diagnostic>),
}

impl fmt::Display for ContextValue
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            ContextValue::Text(text) => f.write_str(text),
            ContextValue::Integer(n) => write!(f, "{n}"),
            ContextValue::Float(x) => write!(f, "{x}"),
            ContextValue::Bool(b) => write!(f, "{b}"),
            ContextValue::Diagnostic(diagnostic) => f.write_str(&diagnostic.log_info()),
        }
    }
}

impl From<String> for ContextValue
{
    fn from(value: String) -> Self
    {
        ContextValue::Text(value)
    }
}

impl From<&str> for ContextValue
{
    fn from(value: &str) -> Self
    {
        ContextValue::Text(value.to_string())
    }
}

impl From<i64> for ContextValue
{
    fn from(value: i64) -> Self
    {
        ContextValue::Integer(value)
    }
}

impl From<i32> for ContextValue
{
    fn from(value: i32) -> Self
    {
        ContextValue::Integer(i64::from(value))
    }
}

impl From<f64> for ContextValue
{
    fn from(value: f64) -> Self
    {
        ContextValue::Float(value)
    }
}

impl From<bool> for ContextValue
{
    fn from(value: bool) -> Self
    {
        ContextValue::Bool(value)
    }
}

impl From<Diagnostic> for ContextValue
{
    fn from(value: Diagnostic) -> Self
    {
        ContextValue::Diagnostic(Box::new(value))
    }
}

/// Normalized representation of an error-kind fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic
{
    domain: String,
    code: i64,
    message: String,
    context: BTreeMap<String, ContextValue>,
}

impl Diagnostic
{
    /// Create a diagnostic with an empty context.
    #[must_use]
    pub fn new(domain: impl Into<String>, code: i64, message: impl Into<String>) -> Self
    {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Add one context entry.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self
    {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn domain(&self) -> &str
    {
        &self.domain
    }

    #[must_use]
    pub fn code(&self) -> i64
    {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str
    {
        &self.message
    }

    /// The full context map, reserved keys included.
    #[must_use]
    pub fn context(&self) -> &BTreeMap<String, ContextValue>
    {
        &self.context
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<&str>
    {
        self.context_text(FAILURE_REASON_KEY)
    }

    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<&str>
    {
        self.context_text(RECOVERY_SUGGESTION_KEY)
    }

    /// The nested diagnostic stored under [`UNDERLYING_CAUSE_KEY`], if any.
    #[must_use]
    pub fn underlying_cause(&self) -> Option<&Diagnostic>
    {
        match self.context.get(UNDERLYING_CAUSE_KEY) {
            Some(ContextValue::Diagnostic(cause)) => Some(cause),
            _ => None,
        }
    }

    /// Iterate this diagnostic followed by each underlying cause.
    pub fn chain(&self) -> impl Iterator<Item = &Diagnostic>
    {
        std::iter::successors(Some(self), |diagnostic| diagnostic.underlying_cause())
    }

    /// One-line summary: `message (domain: code)`.
    #[must_use]
    pub fn log_info(&self) -> String
    {
        format!("{} ({}: {})", self.message, self.domain, self.code)
    }

    /// This diagnostic and every underlying cause, one per line.
    #[must_use]
    pub fn log_trace(&self) -> String
    {
        self.chain().map(Diagnostic::log_info).collect::<Vec<_>>().join("\n")
    }

    fn context_text(&self, key: &str) -> Option<&str>
    {
        match self.context.get(key) {
            Some(ContextValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn apply(&mut self, enrichment: Enrichment)
    {
        if let Some(reason) = enrichment.reason {
            self.context.insert(FAILURE_REASON_KEY.to_string(), ContextValue::Text(reason));
        }
        if let Some(suggestion) = enrichment.suggestion {
            self.context.insert(RECOVERY_SUGGESTION_KEY.to_string(), ContextValue::Text(suggestion));
        }
        if let Some(cause) = enrichment.underlying_cause {
            self.context.insert(UNDERLYING_CAUSE_KEY.to_string(), cause.into());
        }
    }
}

impl fmt::Display for Diagnostic
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.log_info())
    }
}

/// A fault with no structure of its own: just a type and a textual rendering.
///
/// Built from any `Display` value with [`OpaqueFault::of`], or from a
/// `std::error::Error` with [`OpaqueFault::from_error`], which also keeps the
/// text of its `source()` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueFault
{
    type_name: &'static str,
    rendering: String,
    sources: Vec<String>,
}

impl OpaqueFault
{
    /// Capture `fault`'s type name and `Display` rendering.
    ///
    /// The type name is the static type of `T`. Behind a trait object
    /// (`&dyn Error`, or `&*boxed`) it names the trait object, so every such
    /// fault shares one domain; use [`OpaqueFault::with_type_name`] to set it.
    #[must_use]
    pub fn of<T>(fault: &T) -> Self
    where
        T: fmt::Display + ?Sized,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            rendering: fault.to_string(),
            sources: Vec::new(),
        }
    }

    /// Capture an error together with up to [`MAX_SOURCE_DEPTH`] of its sources.
    ///
    /// The domain follows [`OpaqueFault::of`], so boxed errors report the
    /// trait object's name.
    #[must_use]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut fault = Self::of(error);
        let mut source = error.source();
        while let Some(inner) = source {
            if fault.sources.len() == MAX_SOURCE_DEPTH {
                break;
            }
            fault.sources.push(inner.to_string());
            source = inner.source();
        }
        fault
    }

    /// Replace the captured type name, which becomes the diagnostic domain.
    #[must_use]
    pub fn with_type_name(mut self, type_name: &'static str) -> Self
    {
        self.type_name = type_name;
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str
    {
        self.type_name
    }

    #[must_use]
    pub fn rendering(&self) -> &str
    {
        &self.rendering
    }
}

/// An error-kind fault as handed to a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorFault
{
    /// Already structured; copied verbatim
    Structured(Diagnostic),
    /// No structure; wrapped with a domain derived from its type
    Opaque(OpaqueFault),
}

impl From<Diagnostic> for ErrorFault
{
    fn from(value: Diagnostic) -> Self
    {
        ErrorFault::Structured(value)
    }
}

impl From<OpaqueFault> for ErrorFault
{
    fn from(value: OpaqueFault) -> Self
    {
        ErrorFault::Opaque(value)
    }
}

/// Caller-supplied data overlaid onto a diagnostic during normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment
{
    pub reason: Option<String>,
    pub suggestion: Option<String>,
    pub underlying_cause: Option<Diagnostic>,
}

impl Enrichment
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self
    {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self
    {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn underlying_cause(mut self, cause: Diagnostic) -> Self
    {
        self.underlying_cause = Some(cause);
        self
    }

    /// `true` when nothing would be overlaid.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.reason.is_none() && self.suggestion.is_none() && self.underlying_cause.is_none()
    }
}

/// Normalize an error-kind fault into a [`Diagnostic`].
///
/// Structured faults keep their domain, code, message and every context entry.
/// Opaque faults get their type name as domain, [`OPAQUE_FAULT_CODE`] as code
/// and their rendering as message; a captured `source()` chain becomes nested
/// underlying causes. The enrichment is then overlaid on the three reserved
/// keys only, replacing whatever those keys held.
///
/// This function is total: it never panics and never drops enrichment data.
#[must_use]
pub fn normalize(fault: ErrorFault, enrichment: Enrichment) -> Diagnostic
{
    let mut diagnostic = match fault {
        ErrorFault::Structured(diagnostic) => diagnostic,
        ErrorFault::Opaque(opaque) => {
            let mut diagnostic = Diagnostic::new(opaque.type_name, OPAQUE_FAULT_CODE, opaque.rendering);
            if let Some(cause) = source_chain(&opaque.sources) {
                diagnostic.context.insert(UNDERLYING_CAUSE_KEY.to_string(), cause.into());
            }
            diagnostic
        }
    };
    diagnostic.apply(enrichment);
    diagnostic
}

/// Fold source messages (outermost first) into a nested cause chain.
fn source_chain(sources: &[String]) -> Option<Diagnostic>
{
    sources.iter().rev().fold(None, |inner, message| {
        let mut diagnostic = Diagnostic::new(ERROR_SOURCE_DOMAIN, OPAQUE_FAULT_CODE, message.clone());
        if let Some(inner) = inner {
            diagnostic.context.insert(UNDERLYING_CAUSE_KEY.to_string(), inner.into());
        }
        Some(diagnostic)
    })
}
