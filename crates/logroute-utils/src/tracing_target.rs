//! # Tracing Target
//!
//! A [`LogTarget`] that re-emits logroute records as `tracing` events, so the
//! subscriber installed by [`init_logging`](crate::logging::init_logging) becomes
//! the final destination for routed logs.
//!
//! Every event uses the `logroute` tracing target and carries these fields:
//! `logger`, `severity` (the logroute level name), `function`, `file`, `line`,
//! `module` (when known), `diagnostic` and `exception` (when a fault is
//! attached). The record message becomes the event message.

use logroute_core::diagnostic::Diagnostic;
use logroute_core::error::LogrouteResult;
use logroute_core::level::LogLevel;
use logroute_core::record::LogRecord;
use logroute_core::target::LogTarget;
use tracing::Level;

/// `tracing` target name used for every forwarded record.
pub const TRACING_TARGET_NAME: &str = "logroute";

/// Forwards records to the current `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingTarget
{
    max_level: LogLevel,
}

impl Default for TracingTarget
{
    fn default() -> Self
    {
        Self::new(LogLevel::Any)
    }
}

impl TracingTarget
{
    /// A target that forwards records at or above `max_level`.
    ///
    /// The subscriber's own filter still applies on top of this.
    #[must_use]
    pub fn new(max_level: LogLevel) -> Self
    {
        Self { max_level }
    }
}

// tracing needs the level as a constant, hence one expansion per level.
macro_rules! forward {
    ($level:expr, $record:expr, $diagnostic:expr, $exception:expr) => {{
        let call_site = $record.call_site();
        tracing::event!(
            target: TRACING_TARGET_NAME,
            $level,
            logger = $record.logger_name(),
            severity = $record.level().name(),
            function = call_site.function(),
            file = call_site.file(),
            line = call_site.line(),
            module = call_site.module(),
            diagnostic = $diagnostic,
            exception = $exception,
            "{}",
            $record.message().unwrap_or_default()
        )
    }};
}

impl LogTarget for TracingTarget
{
    fn name(&self) -> &str
    {
        "tracing"
    }

    fn max_level(&self) -> LogLevel
    {
        self.max_level
    }

    fn write(&self, record: &LogRecord) -> LogrouteResult<()>
    {
        let diagnostic = record.diagnostic().map(Diagnostic::log_trace);
        let exception = record.exception().map(|exception| exception.log_trace(true));
        let diagnostic = diagnostic.as_deref();
        let exception = exception.as_deref();

        // Same mapping as `crate::logging::tracing_level`; records are never Off or Any.
        match record.level() {
            LogLevel::Alert | LogLevel::Error => forward!(Level::ERROR, record, diagnostic, exception),
            LogLevel::Warning => forward!(Level::WARN, record, diagnostic, exception),
            LogLevel::Notice | LogLevel::Info => forward!(Level::INFO, record, diagnostic, exception),
            LogLevel::Debug => forward!(Level::DEBUG, record, diagnostic, exception),
            LogLevel::Off | LogLevel::Any => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    use logroute_core::callsite::CallSiteInfo;
    use logroute_core::diagnostic::Diagnostic;
    use logroute_core::dispatch::LogRequest;
    use logroute_core::logger::Logger;

    use super::*;

    /// Collects everything the test subscriber writes.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture
    {
        fn text(&self) -> String
        {
            String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
        }
    }

    impl io::Write for Capture
    {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>
        {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()>
        {
            Ok(())
        }
    }

    fn captured(request: LogRequest, target: TracingTarget) -> String
    {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();

        let logger = Logger::new("payments", LogLevel::Any, vec![Arc::new(target)]);
        tracing::subscriber::with_default(subscriber, || logger.log(request));
        capture.text()
    }

    fn here() -> CallSiteInfo
    {
        CallSiteInfo::build("checkout", "src/pay.rs", 42, Some("billing"))
    }

    #[test]
    fn test_forwards_message_and_fields()
    {
        let output = captured(
            LogRequest::new(here())
                .error(Diagnostic::new("net", 7, "card declined"))
                .message("charge failed"),
            TracingTarget::default(),
        );

        assert!(output.contains("ERROR"));
        assert!(output.contains("charge failed"));
        assert!(output.contains("payments"));
        assert!(output.contains("card declined (net: 7)"));
        assert!(output.contains("billing"));
    }

    #[test]
    fn test_notice_is_reported_as_info()
    {
        let output = captured(LogRequest::new(here()).message("started"), TracingTarget::default());

        assert!(output.contains("INFO"));
        assert!(output.contains("NOTICE"));
    }

    #[test]
    fn test_target_threshold()
    {
        let output = captured(LogRequest::new(here()), TracingTarget::new(LogLevel::Info));

        assert!(output.is_empty());
    }

    #[test]
    fn test_write_without_subscriber_succeeds()
    {
        let logger = Logger::new("quiet", LogLevel::Any, vec![Arc::new(TracingTarget::default())]);
        logger.log(LogRequest::new(here()).message("nobody listens"));

        assert_eq!(TracingTarget::default().name(), "tracing");
        assert_eq!(TracingTarget::new(LogLevel::Warning).max_level(), LogLevel::Warning);
    }
}
