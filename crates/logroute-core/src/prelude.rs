//! Common module for library exports

pub use crate::callsite::{CallSiteInfo, CallSiteKey, CallSiteValue};
pub use crate::diagnostic::{ContextValue, Diagnostic, Enrichment, ErrorFault, OpaqueFault};
pub use crate::dispatch::{LogRequest, MessageSource};
pub use crate::error::{LogrouteError, LogrouteResult};
pub use crate::exception::ExceptionFault;
pub use crate::fault::{Fault, NormalizedFault};
pub use crate::format::FormatArg;
pub use crate::formatter::{InfoMask, TextFormatter};
pub use crate::level::{resolve_level, LogLevel};
pub use crate::logger::{Logger, LoggerConfig};
pub use crate::record::LogRecord;
pub use crate::registry::{application_logger, logger, registry, LoggerRegistry, APPLICATION_LOGGER_NAME};
pub use crate::target::{ConsoleTarget, LogTarget, MemoryTarget};
pub use crate::{call_site, function_name, log, log_error, log_exception};
