//! Tests for log levels and level inference

use std::str::FromStr;

use logroute_core::error::LogrouteError;
use logroute_core::level::{resolve_level, LogLevel};

#[test]
fn test_resolve_exception_is_alert()
{
    assert_eq!(resolve_level(LogLevel::Any, false, false, true), LogLevel::Alert);
}

#[test]
fn test_resolve_error_is_error()
{
    assert_eq!(resolve_level(LogLevel::Any, false, true, false), LogLevel::Error);
}

#[test]
fn test_resolve_format_is_notice()
{
    assert_eq!(resolve_level(LogLevel::Any, true, false, false), LogLevel::Notice);
}

#[test]
fn test_resolve_bare_call_is_debug()
{
    assert_eq!(resolve_level(LogLevel::Any, false, false, false), LogLevel::Debug);
}

#[test]
fn test_resolve_precedence()
{
    // Exception outranks error, which outranks a message.
    assert_eq!(resolve_level(LogLevel::Any, true, true, true), LogLevel::Alert);
    assert_eq!(resolve_level(LogLevel::Any, true, true, false), LogLevel::Error);
    assert_eq!(resolve_level(LogLevel::Any, true, false, true), LogLevel::Alert);
}

#[test]
fn test_resolve_explicit_level_always_wins()
{
    for level in LogLevel::ALL.into_iter().filter(|level| *level != LogLevel::Any) {
        for flags in 0..8u8 {
            let (format, error, exception) = (flags & 1 != 0, flags & 2 != 0, flags & 4 != 0);
            assert_eq!(resolve_level(level, format, error, exception), level);
        }
    }
}

#[test]
fn test_level_ordering()
{
    assert!(LogLevel::Off < LogLevel::Alert);
    assert!(LogLevel::Alert < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Warning);
    assert!(LogLevel::Warning < LogLevel::Notice);
    assert!(LogLevel::Notice < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Any);
}

#[test]
fn test_level_admission()
{
    assert!(LogLevel::Error.is_admitted_by(LogLevel::Notice));
    assert!(LogLevel::Notice.is_admitted_by(LogLevel::Notice));
    assert!(!LogLevel::Debug.is_admitted_by(LogLevel::Notice));
    assert!(LogLevel::Debug.is_admitted_by(LogLevel::Any));
    assert!(!LogLevel::Alert.is_admitted_by(LogLevel::Off));
    assert!(!LogLevel::Off.is_admitted_by(LogLevel::Any));
    assert!(!LogLevel::Any.is_admitted_by(LogLevel::Any));
}

#[test]
fn test_level_from_str()
{
    assert_eq!(LogLevel::from_str("alert").unwrap(), LogLevel::Alert);
    assert_eq!(LogLevel::from_str("ERROR").unwrap(), LogLevel::Error);
    assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warning);
    assert_eq!(LogLevel::from_str("Notice").unwrap(), LogLevel::Notice);
    assert_eq!(LogLevel::from_str(" info ").unwrap(), LogLevel::Info);
    assert_eq!(LogLevel::from_str("debug").unwrap(), LogLevel::Debug);
    assert_eq!(LogLevel::from_str("none").unwrap(), LogLevel::Off);
    assert_eq!(LogLevel::from_str("any").unwrap(), LogLevel::Any);

    match LogLevel::from_str("verbose") {
        Err(LogrouteError::InvalidLevel(name)) => assert_eq!(name, "verbose"),
        other => panic!("Expected InvalidLevel, got {other:?}"),
    }
}

#[test]
fn test_level_display_round_trips()
{
    for level in LogLevel::ALL {
        assert_eq!(LogLevel::from_str(&level.to_string()).unwrap(), level);
    }
}

#[test]
fn test_level_default_is_any()
{
    assert_eq!(LogLevel::default(), LogLevel::Any);
}
