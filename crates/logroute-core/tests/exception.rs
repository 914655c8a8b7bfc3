//! Tests for exception faults

use logroute_core::exception::{ExceptionFault, PANIC_EXCEPTION_NAME};

#[test]
fn test_probe_captures_str_panic()
{
    let caught = ExceptionFault::probe(|| panic!("boom")).expect("panic should be captured");

    assert_eq!(caught.name(), PANIC_EXCEPTION_NAME);
    assert_eq!(caught.reason(), Some("boom"));
}

#[test]
fn test_probe_captures_formatted_panic()
{
    let index = 9;
    let caught = ExceptionFault::probe(|| panic!("index {index} out of range")).expect("panic should be captured");

    assert_eq!(caught.reason(), Some("index 9 out of range"));
}

#[test]
fn test_probe_without_panic_is_none()
{
    let mut ran = false;
    assert!(ExceptionFault::probe(|| ran = true).is_none());
    assert!(ran);
}

#[test]
fn test_from_panic_with_unknown_payload()
{
    let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
    let exception = ExceptionFault::from_panic(payload.as_ref());

    assert_eq!(exception.reason(), Some("Box<dyn Any>"));
}

#[test]
fn test_log_info_and_trace()
{
    let root = ExceptionFault::new("IoError").with_reason("disk unplugged");
    let exception = ExceptionFault::new("SaveError")
        .with_reason("could not save")
        .with_call_stack(["0: app::save", "1: app::main"])
        .with_cause(root);

    assert_eq!(exception.log_info(false), "SaveError: could not save");
    assert_eq!(exception.log_info(true), "SaveError: could not save\n0: app::save\n1: app::main");
    assert_eq!(exception.log_trace(false), "SaveError: could not save\nIoError: disk unplugged");
    assert_eq!(exception.chain().count(), 2);
    assert_eq!(exception.cause().map(ExceptionFault::name), Some("IoError"));
}

#[test]
fn test_exception_without_reason()
{
    let exception = ExceptionFault::new("Timeout").with_user_info("after_ms", "500");

    assert_eq!(exception.to_string(), "Timeout");
    assert_eq!(exception.user_info().get("after_ms").map(String::as_str), Some("500"));
}
