//! Tests for error types

use std::error::Error;
use std::io;

use logroute_core::error::LogrouteError;

#[test]
fn test_error_messages()
{
    assert_eq!(LogrouteError::InvalidLevel("loud".to_string()).to_string(), "Unknown log level: loud");
    assert_eq!(
        LogrouteError::ReservedLoggerName("application".to_string()).to_string(),
        "Logger name is reserved: application"
    );
}

#[test]
fn test_target_write_keeps_source()
{
    let error = LogrouteError::TargetWrite {
        target: "console".to_string(),
        source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
    };

    assert_eq!(error.to_string(), "Log target 'console' failed: pipe closed");
    assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("pipe closed"));
}

#[test]
fn test_io_error_conversion()
{
    let error: LogrouteError = io::Error::new(io::ErrorKind::NotFound, "missing").into();

    assert!(matches!(error, LogrouteError::Io(_)));
    assert_eq!(error.to_string(), "IO error: missing");
}
