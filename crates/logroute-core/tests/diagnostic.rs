//! Tests for fault normalization

use std::error::Error;
use std::fmt;

use logroute_core::diagnostic::{
    normalize, ContextValue, Diagnostic, Enrichment, ErrorFault, OpaqueFault, ERROR_SOURCE_DOMAIN,
    FAILURE_REASON_KEY, OPAQUE_FAULT_CODE, RECOVERY_SUGGESTION_KEY, UNDERLYING_CAUSE_KEY,
};
use logroute_core::exception::ExceptionFault;
use logroute_core::fault::{Fault, NormalizedFault};

#[derive(Debug)]
enum PaymentError
{
    CardDeclined,
}

impl fmt::Display for PaymentError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            PaymentError::CardDeclined => f.write_str("CardDeclined"),
        }
    }
}

#[derive(Debug)]
struct Wrapped
{
    inner: std::io::Error,
}

impl fmt::Display for Wrapped
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str("could not load settings")
    }
}

impl Error for Wrapped
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        Some(&self.inner)
    }
}

#[test]
fn test_opaque_fault_uses_rendering_and_type()
{
    let diagnostic = normalize(ErrorFault::Opaque(OpaqueFault::of(&PaymentError::CardDeclined)), Enrichment::new());

    assert_eq!(diagnostic.message(), "CardDeclined");
    assert!(diagnostic.domain().ends_with("PaymentError"));
    assert_eq!(diagnostic.code(), OPAQUE_FAULT_CODE);
    assert!(diagnostic.context().is_empty());
}

#[test]
fn test_opaque_fault_domain_is_deterministic()
{
    let first = normalize(OpaqueFault::of(&PaymentError::CardDeclined).into(), Enrichment::new());
    let second = normalize(OpaqueFault::of(&PaymentError::CardDeclined).into(), Enrichment::new());

    assert_eq!(first.domain(), second.domain());
    assert_eq!(first.code(), second.code());
}

#[test]
fn test_opaque_fault_keeps_enrichment()
{
    let cause = Diagnostic::new("bank", 51, "insufficient funds");
    let enrichment = Enrichment::new().reason("issuer refused").suggestion("use another card").underlying_cause(cause.clone());
    let diagnostic = normalize(OpaqueFault::of(&PaymentError::CardDeclined).into(), enrichment);

    assert_eq!(diagnostic.failure_reason(), Some("issuer refused"));
    assert_eq!(diagnostic.recovery_suggestion(), Some("use another card"));
    assert_eq!(diagnostic.underlying_cause(), Some(&cause));
}

#[test]
fn test_std_error_sources_become_underlying_causes()
{
    let error = Wrapped {
        inner: std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml missing"),
    };
    let diagnostic = normalize(OpaqueFault::from_error(&error).into(), Enrichment::new());

    assert_eq!(diagnostic.message(), "could not load settings");
    let cause = diagnostic.underlying_cause().expect("source chain should be kept");
    assert_eq!(cause.domain(), ERROR_SOURCE_DOMAIN);
    assert_eq!(cause.message(), "settings.toml missing");
    assert!(cause.underlying_cause().is_none());
}

#[test]
fn test_boxed_errors_share_trait_object_domain()
{
    let io: Box<dyn Error> = Box::new(std::io::Error::other("disk full"));
    let formatting: Box<dyn Error> = Box::new(fmt::Error);

    let io_fault = OpaqueFault::from_error(&*io);
    let formatting_fault = OpaqueFault::from_error(&*formatting);
    assert_eq!(io_fault.type_name(), formatting_fault.type_name());
    assert_ne!(OpaqueFault::from_error(&fmt::Error).type_name(), io_fault.type_name());

    let diagnostic = normalize(io_fault.with_type_name("io").into(), Enrichment::new());
    assert_eq!(diagnostic.domain(), "io");
    assert_eq!(diagnostic.code(), OPAQUE_FAULT_CODE);
    assert_eq!(diagnostic.message(), "disk full");
}

#[test]
fn test_structured_fault_is_copied_verbatim()
{
    let structured = Diagnostic::new("net", 7, "connection reset").with_context("retry", "2");
    let diagnostic = normalize(ErrorFault::Structured(structured.clone()), Enrichment::new());

    assert_eq!(diagnostic, structured);
}

#[test]
fn test_structured_fault_overlay_preserves_existing_keys()
{
    let structured = Diagnostic::new("net", 7, "connection reset")
        .with_context("retry", "2")
        .with_context("host", "db-1")
        .with_context(FAILURE_REASON_KEY, "stale reason");
    let diagnostic = normalize(
        ErrorFault::Structured(structured),
        Enrichment::new().reason("peer closed the socket").suggestion("check the proxy"),
    );

    let context = diagnostic.context();
    assert_eq!(context.get("retry"), Some(&ContextValue::from("2")));
    assert_eq!(context.get("host"), Some(&ContextValue::from("db-1")));
    assert_eq!(context.get(FAILURE_REASON_KEY), Some(&ContextValue::from("peer closed the socket")));
    assert_eq!(context.get(RECOVERY_SUGGESTION_KEY), Some(&ContextValue::from("check the proxy")));
    assert!(!context.contains_key(UNDERLYING_CAUSE_KEY));
    assert_eq!(context.len(), 4);
}

#[test]
fn test_diagnostic_log_trace_walks_causes()
{
    let root = Diagnostic::new("disk", 28, "no space left");
    let middle = normalize(Diagnostic::new("db", 3, "write failed").into(), Enrichment::new().underlying_cause(root));
    let top = normalize(Diagnostic::new("app", 1, "save failed").into(), Enrichment::new().underlying_cause(middle));

    assert_eq!(top.chain().count(), 3);
    assert_eq!(top.log_trace(), "save failed (app: 1)\nwrite failed (db: 3)\nno space left (disk: 28)");
}

#[test]
fn test_fault_normalize_routes_by_kind()
{
    let error = Fault::from(Diagnostic::new("net", 7, "reset")).normalize(Enrichment::new().reason("x"));
    assert!(matches!(error, NormalizedFault::Error(ref d) if d.failure_reason() == Some("x")));

    let exception = ExceptionFault::new("RangeError").with_reason("index 9 of 3");
    let normalized = Fault::from(exception.clone()).normalize(Enrichment::new().reason("ignored"));
    assert_eq!(normalized, NormalizedFault::Exception(exception));
}
