//! Fault inputs accepted by a log call and their normalized form.

use std::error::Error as StdError;
use std::fmt;

use crate::diagnostic::{normalize, Diagnostic, Enrichment, ErrorFault, OpaqueFault};
use crate::exception::ExceptionFault;

/// Any fault a caller can attach to a log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault
{
    /// A structured error, copied verbatim
    Structured(Diagnostic),
    /// An error with no structure of its own
    Opaque(OpaqueFault),
    /// A raised exception or caught panic
    Exception(ExceptionFault),
}

impl Fault
{
    /// Wrap a `std::error::Error`, keeping its source chain.
    #[must_use]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        Fault::Opaque(OpaqueFault::from_error(error))
    }

    /// Wrap any displayable value as an opaque error.
    #[must_use]
    pub fn opaque<T>(fault: &T) -> Self
    where
        T: fmt::Display + ?Sized,
    {
        Fault::Opaque(OpaqueFault::of(fault))
    }

    #[must_use]
    pub fn is_exception(&self) -> bool
    {
        matches!(self, Fault::Exception(_))
    }

    #[must_use]
    pub fn is_error(&self) -> bool
    {
        !self.is_exception()
    }

    /// Normalize into the form stored on a record.
    ///
    /// Error kinds go through [`normalize`]; exceptions pass through unchanged
    /// and ignore `enrichment`.
    #[must_use]
    pub fn normalize(self, enrichment: Enrichment) -> NormalizedFault
    {
        match self {
            Fault::Structured(diagnostic) => NormalizedFault::Error(normalize(ErrorFault::Structured(diagnostic), enrichment)),
            Fault::Opaque(opaque) => NormalizedFault::Error(normalize(ErrorFault::Opaque(opaque), enrichment)),
            Fault::Exception(exception) => NormalizedFault::Exception(exception),
        }
    }
}

impl From<ErrorFault> for Fault
{
    fn from(value: ErrorFault) -> Self
    {
        match value {
            ErrorFault::Structured(diagnostic) => Fault::Structured(diagnostic),
            ErrorFault::Opaque(opaque) => Fault::Opaque(opaque),
        }
    }
}

impl From<Diagnostic> for Fault
{
    fn from(value: Diagnostic) -> Self
    {
        Fault::Structured(value)
    }
}

impl From<OpaqueFault> for Fault
{
    fn from(value: OpaqueFault) -> Self
    {
        Fault::Opaque(value)
    }
}

impl From<ExceptionFault> for Fault
{
    fn from(value: ExceptionFault) -> Self
    {
        Fault::Exception(value)
    }
}

/// The fault carried by a record: an error diagnostic or an exception, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedFault
{
    Error(Diagnostic),
    Exception(ExceptionFault),
}
