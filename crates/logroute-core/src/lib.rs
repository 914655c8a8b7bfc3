//! # logroute-core
//!
//! Level inference, fault normalization, and named-logger routing for logroute.
//!
//! This crate is the decision engine between a log call and its destinations:
//! - Resolving an implicit level when the caller does not give one
//! - Normalizing errors and exceptions into uniform fault records
//! - Capturing call-site metadata (function, file, line, module)
//! - Routing each call to a named logger held in a shared registry
//!
//! ## Quick Start
//!
//! ```rust
//! use logroute_core::diagnostic::Diagnostic;
//! use logroute_core::level::LogLevel;
//! use logroute_core::{log, log_error};
//!
//! // Inferred as NOTICE: a message and no fault.
//! log!(LogLevel::Any, "service started on port {}", 8080);
//!
//! // Inferred as ERROR and routed to the "payments" logger.
//! log_error!(to: "payments", LogLevel::Any, Diagnostic::new("net", 7, "connection reset"));
//! ```
//!
//! ## Level inference
//!
//! | Call carries | Level |
//! |---|---|
//! | an exception | `Alert` |
//! | an error | `Error` |
//! | a message (even an empty one) | `Notice` |
//! | nothing | `Debug` |
//!
//! An explicit level always wins over inference.

pub mod callsite;
pub mod diagnostic;
pub mod dispatch;
pub mod error;
pub mod exception;
pub mod fault;
pub mod format;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod target;

// Re-export commonly used types
pub use callsite::CallSiteInfo;
pub use diagnostic::Diagnostic;
pub use dispatch::LogRequest;
pub use error::{LogrouteError, LogrouteResult};
pub use exception::ExceptionFault;
pub use fault::Fault;
pub use level::LogLevel;
pub use logger::Logger;
pub use record::LogRecord;
pub use registry::{application_logger, dispatch, logger, registry, LoggerRegistry};
