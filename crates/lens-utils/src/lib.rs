//! # Lens Utilities
//!
//! Shared utilities, logging, config, and helpers for Lens.
//!
//! This crate provides common functionality used across the Lens workspace,
//! chiefly the logging setup for running the engine embedded in a debugger
//! host (see [`logging`]).

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_console_logging, init_host_logging, HostLogGuard, LogFormat, LogLevel, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
