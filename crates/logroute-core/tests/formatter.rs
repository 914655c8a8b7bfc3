//! Tests for the text formatter

use std::sync::Arc;

use logroute_core::callsite::CallSiteInfo;
use logroute_core::diagnostic::Diagnostic;
use logroute_core::dispatch::LogRequest;
use logroute_core::exception::ExceptionFault;
use logroute_core::formatter::{InfoMask, TextFormatter};
use logroute_core::level::LogLevel;
use logroute_core::logger::Logger;
use logroute_core::record::LogRecord;
use logroute_core::target::MemoryTarget;

/// Log `request` to a throwaway logger and return the record it produced.
fn record_of(request: LogRequest) -> LogRecord
{
    let memory = Arc::new(MemoryTarget::default());
    Logger::new("payments", LogLevel::Any, vec![memory.clone()]).log(request);
    memory.drain().remove(0)
}

fn here() -> CallSiteInfo
{
    CallSiteInfo::build("checkout", "src/pay.rs", 42, Some("billing"))
}

fn without_date_or_process() -> TextFormatter
{
    TextFormatter::new().hiding(InfoMask::DATE | InfoMask::PROCESS)
}

#[test]
fn test_format_full_header_and_diagnostic()
{
    let record = record_of(
        LogRequest::new(here())
            .error(Diagnostic::new("net", 7, "card declined"))
            .message("charge failed"),
    );

    let text = without_date_or_process().format(&record);

    assert_eq!(
        text,
        "[payments] ERROR checkout (src/pay.rs:42) <billing> charge failed\ncard declined (net: 7)"
    );
}

#[test]
fn test_format_hides_source_code()
{
    let record = record_of(LogRequest::new(here()).message("hello"));

    let text = without_date_or_process().hiding(InfoMask::SOURCE_CODE | InfoMask::MODULE).format(&record);

    assert_eq!(text, "[payments] NOTICE hello");
}

#[test]
fn test_format_line_without_file()
{
    let record = record_of(LogRequest::new(here()).message("hello"));

    let text = without_date_or_process()
        .hiding(InfoMask::FUNCTION | InfoMask::FILE | InfoMask::MODULE | InfoMask::LOGGER_NAME | InfoMask::LEVEL)
        .format(&record);

    assert_eq!(text, "(line 42) hello");
}

#[test]
fn test_format_hides_content()
{
    let record = record_of(
        LogRequest::new(here())
            .error(Diagnostic::new("net", 7, "card declined"))
            .message("charge failed"),
    );

    let text = without_date_or_process().hiding(InfoMask::CONTENT).format(&record);

    assert!(!text.contains("charge failed"));
    assert!(!text.contains('\n'));
}

#[test]
fn test_exception_symbols_follow_threshold()
{
    let exception = ExceptionFault::new("IndexError")
        .with_reason("out of range")
        .with_call_stack(["0: app::lookup"]);
    let hidden = TextFormatter::new().hiding(InfoMask::ALL);

    let alert = record_of(LogRequest::new(here()).exception(exception.clone()));
    let warning = record_of(LogRequest::new(here()).level(LogLevel::Warning).exception(exception));

    assert!(hidden.is_hidden(InfoMask::EXCEPTION));
    assert_eq!(hidden.format(&alert), "");

    let shown = TextFormatter::new().hiding(InfoMask::DATE | InfoMask::PROCESS | InfoMask::SOURCE_CODE | InfoMask::MODULE);
    assert_eq!(shown.format(&alert), "[payments] ALERT\nIndexError: out of range\n0: app::lookup");
    assert_eq!(shown.format(&warning), "[payments] WARNING\nIndexError: out of range");
    assert_eq!(
        shown.with_exception_symbols_threshold(LogLevel::Warning).format(&warning),
        "[payments] WARNING\nIndexError: out of range\n0: app::lookup"
    );
}

#[test]
fn test_invalid_date_format_falls_back()
{
    let record = record_of(LogRequest::new(here()).message("hello"));

    let text = TextFormatter::new()
        .with_date_format("%Q")
        .hiding(InfoMask::ALL)
        .format(&record);
    assert_eq!(text, "");

    let dated = TextFormatter::new()
        .with_date_format("%Q")
        .hiding(InfoMask::PROCESS | InfoMask::SOURCE_CODE | InfoMask::MODULE | InfoMask::LOGGER_NAME | InfoMask::LEVEL | InfoMask::CONTENT)
        .format(&record);
    assert_eq!(dated, record.timestamp().to_rfc3339());
}

#[test]
fn test_info_mask_combinations()
{
    let mask = InfoMask::FILE | InfoMask::LINE;

    assert!(mask.contains(InfoMask::FILE));
    assert!(!mask.contains(InfoMask::FUNCTION));
    assert!(InfoMask::SOURCE_CODE.contains(mask));
    assert!(InfoMask::ALL.contains(InfoMask::CONTENT));
}
