//! # printf-style rendering
//!
//! Renders a printf-style format string with positional substitution. This is
//! what a [`LogRequest`](crate::dispatch::LogRequest) uses when it is given a
//! format string plus [`FormatArg`]s rather than a pre-rendered message.
//!
//! Supported: `%%`, positional `%N$`, the flags `-`, `+`, space, `0` and `#`,
//! width, precision, the length modifiers `h l ll q z j t L` (accepted and
//! ignored) and the conversions `d i u x X o f F e E g G s @ c p`.
//!
//! Rendering never fails. A specifier whose argument is missing, whose
//! conversion is unknown, or whose width or precision exceeds
//! [`MAX_FIELD_WIDTH`], is copied to the output unchanged.
//!
//! ```rust
//! use logroute_core::format::{render, FormatArg};
//!
//! assert_eq!(render("user %s logged in", &["alice".into()]), "user alice logged in");
//! assert_eq!(render("%2$s before %1$s", &["b".into(), "a".into()]), "a before b");
//! assert_eq!(render("%05.1f%%", &[FormatArg::Float(3.14159)]), "003.1%");
//! assert_eq!(render("missing %d", &[]), "missing %d");
//! ```

use std::fmt;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest width or precision a specifier may ask for.
pub const MAX_FIELD_WIDTH: usize = 4096;
const CONVERSIONS: &[u8] = b"diuxXofFeEgGs@cp";

/// One argument substituted into a format string.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg
{
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Bool(bool),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss, clippy::cast_sign_loss)]
impl FormatArg
{
    fn as_i64(&self) -> Option<i64>
    {
        match self {
            FormatArg::Int(n) => Some(*n),
            FormatArg::UInt(n) => Some(*n as i64),
            FormatArg::Float(x) => Some(*x as i64),
            FormatArg::Char(c) => Some(i64::from(u32::from(*c))),
            FormatArg::Bool(b) => Some(i64::from(*b)),
            FormatArg::Str(s) => s.trim().parse().ok(),
        }
    }

    fn as_u64(&self) -> Option<u64>
    {
        match self {
            FormatArg::UInt(n) => Some(*n),
            FormatArg::Int(n) => Some(*n as u64),
            FormatArg::Float(x) => Some(*x as u64),
            FormatArg::Char(c) => Some(u64::from(u32::from(*c))),
            FormatArg::Bool(b) => Some(u64::from(*b)),
            FormatArg::Str(s) => s.trim().parse().ok(),
        }
    }

    fn as_f64(&self) -> Option<f64>
    {
        match self {
            FormatArg::Float(x) => Some(*x),
            FormatArg::Int(n) => Some(*n as f64),
            FormatArg::UInt(n) => Some(*n as f64),
            FormatArg::Str(s) => s.trim().parse().ok(),
            FormatArg::Char(_) | FormatArg::Bool(_) => None,
        }
    }

    fn as_char(&self) -> Option<char>
    {
        match self {
            FormatArg::Char(c) => Some(*c),
            FormatArg::Int(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            FormatArg::UInt(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            FormatArg::Str(s) => s.chars().next(),
            FormatArg::Float(_) | FormatArg::Bool(_) => None,
        }
    }
}

impl fmt::Display for FormatArg
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(n) => write!(f, "{n}"),
            FormatArg::UInt(n) => write!(f, "{n}"),
            FormatArg::Float(x) => write!(f, "{x}"),
            FormatArg::Char(c) => write!(f, "{c}"),
            FormatArg::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FormatArg
{
    fn from(value: &str) -> Self
    {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg
{
    fn from(value: String) -> Self
    {
        FormatArg::Str(value)
    }
}

impl From<char> for FormatArg
{
    fn from(value: char) -> Self
    {
        FormatArg::Char(value)
    }
}

impl From<bool> for FormatArg
{
    fn from(value: bool) -> Self
    {
        FormatArg::Bool(value)
    }
}

impl From<f32> for FormatArg
{
    fn from(value: f32) -> Self
    {
        FormatArg::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg
{
    fn from(value: f64) -> Self
    {
        FormatArg::Float(value)
    }
}

macro_rules! impl_from_integer {
    ($variant:ident, $wide:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg
            {
                fn from(value: $ty) -> Self
                {
                    FormatArg::$variant(<$wide>::from(value))
                }
            }
        )+
    };
}

impl_from_integer!(Int, i64, i8, i16, i32, i64);
impl_from_integer!(UInt, u64, u8, u16, u32, u64);

impl From<isize> for FormatArg
{
    fn from(value: isize) -> Self
    {
        FormatArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for FormatArg
{
    fn from(value: usize) -> Self
    {
        FormatArg::UInt(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

/// Render `format`, substituting `args` in order (or by `%N$` position).
#[must_use]
pub fn render(format: &str, args: &[FormatArg]) -> String
{
    let mut out = String::with_capacity(format.len());
    let mut next_arg = 0;
    let mut rest = format;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let spec_src = &rest[pos..];
        let Some((spec, consumed)) = Spec::parse(spec_src) else {
            out.push('%');
            rest = &spec_src[1..];
            continue;
        };

        if spec.conversion == b'%' {
            out.push('%');
        } else {
            let index = spec.position.map_or_else(
                || {
                    next_arg += 1;
                    next_arg - 1
                },
                |position| position - 1,
            );
            match args.get(index) {
                Some(arg) => out.push_str(&spec.apply(arg)),
                None => out.push_str(&spec_src[..consumed]),
            }
        }
        rest = &spec_src[consumed..];
    }

    out.push_str(rest);
    out
}

/// A parsed conversion specifier.
#[derive(Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
struct Spec
{
    position: Option<usize>,
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: u8,
}

impl Spec
{
    /// Parse the specifier at the start of `src` (which begins with `%`).
    /// Returns the spec and the number of bytes it spans.
    fn parse(src: &str) -> Option<(Self, usize)>
    {
        let bytes = src.as_bytes();
        let mut spec = Spec::default();
        let mut i = 1;

        if bytes.get(i) == Some(&b'%') {
            spec.conversion = b'%';
            return Some((spec, 2));
        }

        if let (Some(n), end) = read_number(bytes, i) {
            if bytes.get(end) == Some(&b'$') {
                if n == 0 {
                    return None;
                }
                spec.position = Some(n);
                i = end + 1;
            }
        }

        while let Some(&flag) = bytes.get(i) {
            match flag {
                b'-' => spec.left = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'0' => spec.zero = true,
                b'#' => spec.alt = true,
                _ => break,
            }
            i += 1;
        }

        let (width, end) = read_number(bytes, i);
        if width.is_some_and(|width| width > MAX_FIELD_WIDTH) {
            return None;
        }
        spec.width = width;
        i = end;

        if bytes.get(i) == Some(&b'.') {
            let (precision, end) = read_number(bytes, i + 1);
            let precision = precision.unwrap_or(0);
            if precision > MAX_FIELD_WIDTH {
                return None;
            }
            spec.precision = Some(precision);
            i = end;
        }

        while matches!(bytes.get(i), Some(b'h' | b'l' | b'q' | b'z' | b'j' | b't' | b'L')) {
            i += 1;
        }

        let conversion = *bytes.get(i)?;
        if !CONVERSIONS.contains(&conversion) {
            return None;
        }
        spec.conversion = conversion;
        Some((spec, i + 1))
    }

    fn apply(&self, arg: &FormatArg) -> String
    {
        let converted = match self.conversion {
            b'd' | b'i' => arg.as_i64().map(|n| self.signed(n)),
            b'u' => arg.as_u64().map(|n| self.min_digits(n.to_string())),
            b'x' => arg.as_u64().map(|n| self.radix(format!("{n:x}"), "0x", n)),
            b'X' => arg.as_u64().map(|n| self.radix(format!("{n:X}"), "0X", n)),
            b'o' => arg.as_u64().map(|n| self.radix(format!("{n:o}"), "0", n)),
            b'p' => arg.as_u64().map(|n| format!("0x{n:x}")),
            b'f' | b'F' | b'e' | b'E' | b'g' | b'G' => arg.as_f64().map(|x| self.float(x)),
            b'c' => arg.as_char().map(String::from),
            _ => None,
        };

        match converted {
            Some(text) => self.pad(text, true),
            None => {
                let mut text = arg.to_string();
                if let Some(precision) = self.precision {
                    text = text.chars().take(precision).collect();
                }
                self.pad(text, false)
            }
        }
    }

    fn sign(&self, negative: bool) -> &'static str
    {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    fn min_digits(&self, digits: String) -> String
    {
        match self.precision {
            Some(precision) if digits.len() < precision => format!("{}{digits}", "0".repeat(precision - digits.len())),
            _ => digits,
        }
    }

    fn signed(&self, n: i64) -> String
    {
        format!("{}{}", self.sign(n < 0), self.min_digits(n.unsigned_abs().to_string()))
    }

    fn radix(&self, digits: String, prefix: &str, n: u64) -> String
    {
        let digits = self.min_digits(digits);
        if self.alt && n != 0 && !digits.starts_with('0') {
            format!("{prefix}{digits}")
        } else {
            digits
        }
    }

    fn float(&self, x: f64) -> String
    {
        let upper = self.conversion.is_ascii_uppercase();
        let magnitude = if x.is_nan() {
            "nan".to_string()
        } else if x.is_infinite() {
            "inf".to_string()
        } else {
            let precision = self.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            match self.conversion.to_ascii_lowercase() {
                b'e' => exponent_form(x.abs(), precision),
                b'g' => general_form(x.abs(), precision, self.alt),
                _ => format!("{:.*}", precision, x.abs()),
            }
        };
        let magnitude = if upper { magnitude.to_uppercase() } else { magnitude };
        format!("{}{magnitude}", self.sign(x.is_sign_negative() && !x.is_nan()))
    }

    fn pad(&self, text: String, numeric: bool) -> String
    {
        let len = text.chars().count();
        let Some(width) = self.width.filter(|width| *width > len) else {
            return text;
        };
        let fill = width - len;

        if self.left {
            return format!("{text}{}", " ".repeat(fill));
        }

        let integer_with_precision = self.precision.is_some() && b"diuxXo".contains(&self.conversion);
        let zero_pad = self.zero && numeric && !integer_with_precision && b"diuxXofFeEgG".contains(&self.conversion);
        if zero_pad && !text.ends_with("inf") && !text.ends_with("nan") && !text.ends_with("INF") && !text.ends_with("NAN") {
            let prefix_len = numeric_prefix_len(&text);
            let (prefix, digits) = text.split_at(prefix_len);
            format!("{prefix}{}{digits}", "0".repeat(fill))
        } else {
            format!("{}{text}", " ".repeat(fill))
        }
    }
}

/// Read a run of ASCII digits starting at `start`.
fn read_number(bytes: &[u8], start: usize) -> (Option<usize>, usize)
{
    let mut end = start;
    let mut value: Option<usize> = None;
    while let Some(digit) = bytes.get(end).filter(|b| b.is_ascii_digit()) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(usize::from(digit - b'0')));
        end += 1;
    }
    (value, end)
}

/// Length of the sign and radix prefix that zero padding goes after.
fn numeric_prefix_len(text: &str) -> usize
{
    let sign = usize::from(text.starts_with(['-', '+', ' ']));
    let rest = &text[sign..];
    if rest.starts_with("0x") || rest.starts_with("0X") {
        sign + 2
    } else {
        sign
    }
}

/// C-style `%e` of a non-negative finite value: `d.ddddde+XX`.
fn exponent_form(x: f64, precision: usize) -> String
{
    let rust = format!("{x:.precision$e}");
    let (mantissa, exponent) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// C-style `%g` of a non-negative finite value.
fn general_form(x: f64, precision: usize, alt: bool) -> String
{
    let significant = precision.max(1);
    let exponent = if x == 0.0 {
        0
    } else {
        let probe = format!("{:.*e}", significant - 1, x);
        probe.split_once('e').and_then(|(_, e)| e.parse::<i64>().ok()).unwrap_or(0)
    };

    let significant_i64 = i64::try_from(significant).unwrap_or(i64::MAX);
    let text = if exponent >= -4 && exponent < significant_i64 {
        let decimals = usize::try_from(significant_i64 - 1 - exponent).unwrap_or(0);
        format!("{x:.decimals$}")
    } else {
        exponent_form(x, significant - 1)
    };

    if alt {
        return text;
    }
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => trim_fraction(&text).to_string(),
    }
}

fn trim_fraction(number: &str) -> &str
{
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
