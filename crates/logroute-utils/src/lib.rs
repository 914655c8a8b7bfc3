//! # logroute Utilities
//!
//! Host integration for logroute: subscriber setup, a `tracing` target and
//! environment configuration.
//!
//! Most processes only need [`install`], which wires all three together.

pub mod config;
pub mod logging;
pub mod tracing_target;

// Re-export commonly used items for convenience
pub use config::{install, RoutingConfig};
pub use logging::{init_logging, init_logging_with_level, tracing_level, LogFormat, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
pub use tracing_target::TracingTarget;
