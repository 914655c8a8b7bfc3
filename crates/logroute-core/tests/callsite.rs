//! Tests for call-site info

use logroute_core::call_site;
use logroute_core::callsite::{CallSiteInfo, CallSiteKey, CallSiteValue};

#[test]
fn test_build_without_module()
{
    let info = CallSiteInfo::build("checkout", "src/pay.rs", 42, None::<&str>);

    assert_eq!(info.function(), "checkout");
    assert_eq!(info.file(), "src/pay.rs");
    assert_eq!(info.line(), 42);
    assert_eq!(info.module(), None);
    assert_eq!(info.entries().len(), 3);
    assert_eq!(info.get(CallSiteKey::Line), Some(CallSiteValue::Number(42)));
}

#[test]
fn test_build_with_module()
{
    let info = CallSiteInfo::build("checkout", "src/pay.rs", 42, Some("billing"));

    assert_eq!(info.get(CallSiteKey::Module), Some(CallSiteValue::Text("billing")));
    let keys: Vec<CallSiteKey> = info.entries().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![CallSiteKey::Function, CallSiteKey::File, CallSiteKey::Line, CallSiteKey::Module]);
}

#[test]
fn test_values_are_taken_as_given()
{
    let info = CallSiteInfo::build("", "", 0, Some(""));

    assert_eq!(info.function(), "");
    assert_eq!(info.line(), 0);
    assert_eq!(info.module(), Some(""));
}

#[test]
fn test_key_names()
{
    assert_eq!(CallSiteKey::Function.as_str(), "function");
    assert_eq!(CallSiteKey::File.as_str(), "file");
    assert_eq!(CallSiteKey::Line.as_str(), "line");
    assert_eq!(CallSiteKey::Module.as_str(), "module");
}

#[test]
fn test_macro_captures_enclosing_function()
{
    let line = line!() + 1;
    let here = call_site!();

    assert_eq!(here.file(), file!());
    assert_eq!(here.line(), line);
    assert_eq!(here.function(), "callsite::test_macro_captures_enclosing_function");
}

#[test]
fn test_macro_inside_closure_reports_outer_function()
{
    let capture = || call_site!(module: "billing");
    let here = capture();

    assert_eq!(here.function(), "callsite::test_macro_inside_closure_reports_outer_function");
    assert_eq!(here.module(), Some("billing"));
}
