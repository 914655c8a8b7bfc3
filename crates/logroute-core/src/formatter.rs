//! # Text Formatter
//!
//! Turns a [`LogRecord`] into a single block of text for line-oriented targets
//! such as [`ConsoleTarget`](crate::target::ConsoleTarget).
//!
//! The layout is
//!
//! ```text
//! 2026-10-18 09:14:02 payments[4242] [payments] ERROR checkout (src/pay.rs:42) <billing> card declined
//! card declined (net: 7)
//! ```
//!
//! Every piece can be switched off through an [`InfoMask`] of hidden info.

use std::fmt::Write;
use std::ops::{BitOr, BitOrAssign};

use once_cell::sync::Lazy;

use crate::level::LogLevel;
use crate::record::LogRecord;

/// Default `chrono` date format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A set of info flags, used to hide parts of a formatted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InfoMask(u16);

impl InfoMask
{
    pub const NONE: InfoMask = InfoMask(0);
    pub const FUNCTION: InfoMask = InfoMask(1 << 0);
    pub const FILE: InfoMask = InfoMask(1 << 1);
    pub const LINE: InfoMask = InfoMask(1 << 2);
    pub const MODULE: InfoMask = InfoMask(1 << 3);
    pub const PROCESS_NAME: InfoMask = InfoMask(1 << 4);
    pub const PROCESS_ID: InfoMask = InfoMask(1 << 5);
    pub const DATE: InfoMask = InfoMask(1 << 6);
    pub const LOGGER_NAME: InfoMask = InfoMask(1 << 7);
    pub const LEVEL: InfoMask = InfoMask(1 << 8);
    pub const MESSAGE: InfoMask = InfoMask(1 << 9);
    pub const ERROR: InfoMask = InfoMask(1 << 10);
    pub const EXCEPTION: InfoMask = InfoMask(1 << 11);

    /// Function, file and line.
    pub const SOURCE_CODE: InfoMask = InfoMask(Self::FUNCTION.0 | Self::FILE.0 | Self::LINE.0);
    /// Process name and id.
    pub const PROCESS: InfoMask = InfoMask(Self::PROCESS_NAME.0 | Self::PROCESS_ID.0);
    /// Message, error and exception.
    pub const CONTENT: InfoMask = InfoMask(Self::MESSAGE.0 | Self::ERROR.0 | Self::EXCEPTION.0);
    pub const ALL: InfoMask = InfoMask(u16::MAX);

    #[must_use]
    pub const fn contains(self, other: InfoMask) -> bool
    {
        self.0 & other.0 == other.0
    }
}

impl BitOr for InfoMask
{
    type Output = InfoMask;

    fn bitor(self, rhs: Self) -> Self::Output
    {
        InfoMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for InfoMask
{
    fn bitor_assign(&mut self, rhs: Self)
    {
        self.0 |= rhs.0;
    }
}

/// Configurable record formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormatter
{
    date_format: String,
    hidden: InfoMask,
    exception_symbols_threshold: LogLevel,
}

impl Default for TextFormatter
{
    fn default() -> Self
    {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            hidden: InfoMask::NONE,
            exception_symbols_threshold: LogLevel::Error,
        }
    }
}

impl TextFormatter
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Use a `chrono` strftime-style date format.
    #[must_use]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self
    {
        self.date_format = date_format.into();
        self
    }

    /// Hide the given info from formatted output.
    #[must_use]
    pub fn hiding(mut self, info: InfoMask) -> Self
    {
        self.hidden |= info;
        self
    }

    /// Include exception call stacks for records at or above `level`.
    #[must_use]
    pub fn with_exception_symbols_threshold(mut self, level: LogLevel) -> Self
    {
        self.exception_symbols_threshold = level;
        self
    }

    #[must_use]
    pub fn is_hidden(&self, info: InfoMask) -> bool
    {
        self.hidden.contains(info)
    }

    /// Format `record` as text without a trailing newline.
    #[must_use]
    pub fn format(&self, record: &LogRecord) -> String
    {
        let mut header: Vec<String> = Vec::new();
        let call_site = record.call_site();

        if !self.is_hidden(InfoMask::DATE) {
            header.push(self.format_date(record));
        }
        match (self.is_hidden(InfoMask::PROCESS_NAME), self.is_hidden(InfoMask::PROCESS_ID)) {
            (false, false) => header.push(format!("{}[{}]", process_name(), std::process::id())),
            (false, true) => header.push(process_name().to_string()),
            (true, false) => header.push(format!("[{}]", std::process::id())),
            (true, true) => {}
        }
        if !self.is_hidden(InfoMask::LOGGER_NAME) {
            header.push(format!("[{}]", record.logger_name()));
        }
        if !self.is_hidden(InfoMask::LEVEL) {
            header.push(record.level().name().to_string());
        }
        if !self.is_hidden(InfoMask::FUNCTION) {
            header.push(call_site.function().to_string());
        }
        match (self.is_hidden(InfoMask::FILE), self.is_hidden(InfoMask::LINE)) {
            (false, false) => header.push(format!("({}:{})", call_site.file(), call_site.line())),
            (false, true) => header.push(format!("({})", call_site.file())),
            (true, false) => header.push(format!("(line {})", call_site.line())),
            (true, true) => {}
        }
        if let Some(module) = call_site.module().filter(|_| !self.is_hidden(InfoMask::MODULE)) {
            header.push(format!("<{module}>"));
        }
        if let Some(message) = record.message().filter(|_| !self.is_hidden(InfoMask::MESSAGE)) {
            header.push(message.to_string());
        }

        let mut text = header.join(" ");
        if let Some(diagnostic) = record.diagnostic().filter(|_| !self.is_hidden(InfoMask::ERROR)) {
            text.push('\n');
            text.push_str(&diagnostic.log_trace());
        }
        if let Some(exception) = record.exception().filter(|_| !self.is_hidden(InfoMask::EXCEPTION)) {
            let include_symbols = record.level() <= self.exception_symbols_threshold;
            text.push('\n');
            text.push_str(&exception.log_trace(include_symbols));
        }
        text
    }

    /// Render the record timestamp, falling back to RFC 3339 on a bad date format.
    fn format_date(&self, record: &LogRecord) -> String
    {
        let mut date = String::new();
        if write!(date, "{}", record.timestamp().format(&self.date_format)).is_err() {
            return record.timestamp().to_rfc3339();
        }
        date
    }
}

/// Executable name of the current process.
static PROCESS_NAME: Lazy<String> = Lazy::new(|| {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unknown".to_string())
});

fn process_name() -> &'static str
{
    &PROCESS_NAME
}
