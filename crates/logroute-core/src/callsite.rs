//! # Call-Site Info
//!
//! Metadata identifying where in the calling code a log call originated.
//!
//! The values are injected at the call site by [`call_site!`](crate::call_site),
//! which expands to `file!()`, `line!()` and [`function_name!`](crate::function_name).
//! Nothing here inspects the stack or validates what it is given.

use std::borrow::Cow;
use std::fmt;

/// Keys of the call-site mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallSiteKey
{
    /// Calling function
    Function,
    /// Source file path
    File,
    /// Line number
    Line,
    /// Caller-supplied module name
    Module,
}

impl CallSiteKey
{
    /// Lower-case key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self {
            CallSiteKey::Function => "function",
            CallSiteKey::File => "file",
            CallSiteKey::Line => "line",
            CallSiteKey::Module => "module",
        }
    }
}

/// A value of the call-site mapping: text or a line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSiteValue<'a>
{
    Text(&'a str),
    Number(u32),
}

impl fmt::Display for CallSiteValue<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            CallSiteValue::Text(text) => f.write_str(text),
            CallSiteValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Where a log call came from.
///
/// `function`, `file` and `line` are always set. `module` is only present when
/// the caller supplied one; it is never stored as an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteInfo
{
    function: Cow<'static, str>,
    file: Cow<'static, str>,
    line: u32,
    module: Option<Cow<'static, str>>,
}

impl CallSiteInfo
{
    /// Assemble call-site info from its parts.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use logroute_core::callsite::{CallSiteInfo, CallSiteKey};
    ///
    /// let info = CallSiteInfo::build("checkout", "src/pay.rs", 42, None::<&str>);
    /// assert_eq!(info.line(), 42);
    /// assert!(info.get(CallSiteKey::Module).is_none());
    /// ```
    #[must_use]
    pub fn build<F, P, M>(function: F, file: P, line: u32, module: Option<M>) -> Self
    where
        F: Into<Cow<'static, str>>,
        P: Into<Cow<'static, str>>,
        M: Into<Cow<'static, str>>,
    {
        Self {
            function: function.into(),
            file: file.into(),
            line,
            module: module.map(Into::into),
        }
    }

    /// Return a copy carrying `module`.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<Cow<'static, str>>) -> Self
    {
        self.module = Some(module.into());
        self
    }

    #[must_use]
    pub fn function(&self) -> &str
    {
        &self.function
    }

    #[must_use]
    pub fn file(&self) -> &str
    {
        &self.file
    }

    #[must_use]
    pub fn line(&self) -> u32
    {
        self.line
    }

    #[must_use]
    pub fn module(&self) -> Option<&str>
    {
        self.module.as_deref()
    }

    /// Look up one entry of the mapping.
    #[must_use]
    pub fn get(&self, key: CallSiteKey) -> Option<CallSiteValue<'_>>
    {
        match key {
            CallSiteKey::Function => Some(CallSiteValue::Text(&self.function)),
            CallSiteKey::File => Some(CallSiteValue::Text(&self.file)),
            CallSiteKey::Line => Some(CallSiteValue::Number(self.line)),
            CallSiteKey::Module => self.module().map(CallSiteValue::Text),
        }
    }

    /// All present entries, in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(CallSiteKey, CallSiteValue<'_>)>
    {
        [CallSiteKey::Function, CallSiteKey::File, CallSiteKey::Line, CallSiteKey::Module]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}

/// Strip the helper suffix and closure frames from a `type_name` of a nested fn.
#[doc(hidden)]
#[must_use]
pub fn trim_function_name(raw: &'static str) -> &'static str
{
    let mut name = raw.strip_suffix("::__logroute_here").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Expand to the path of the enclosing function, e.g. `my_crate::payments::charge`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __logroute_here() {}
        fn __logroute_type_name_of<T>(_: T) -> &'static str
        {
            ::std::any::type_name::<T>()
        }
        $crate::callsite::trim_function_name(__logroute_type_name_of(__logroute_here))
    }};
}

/// Capture the current call site as a [`CallSiteInfo`].
///
/// ```rust
/// use logroute_core::call_site;
///
/// let here = call_site!();
/// assert_eq!(here.file(), file!());
/// assert!(here.module().is_none());
///
/// let tagged = call_site!(module: "billing");
/// assert_eq!(tagged.module(), Some("billing"));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::callsite::CallSiteInfo::build($crate::function_name!(), file!(), line!(), None::<&'static str>)
    };
    (module: $module:expr) => {
        $crate::callsite::CallSiteInfo::build($crate::function_name!(), file!(), line!(), Some($module))
    };
}
