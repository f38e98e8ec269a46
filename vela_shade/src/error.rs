//! Error types for Vela Shade
//!
//! This module defines the error types used throughout the crate: pipeline
//! linking, resource binding, and executor failures. The fragment stage
//! itself has no error channel; everything here surfaces at setup level,
//! before any fragment-shading invocation runs.

use std::fmt;

/// Result type for Vela Shade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Vela Shade errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Stage contract failure detected at pipeline-construction time
    /// (duplicate locations, unmatched inputs, target format mismatch)
    InterfaceMismatch(String),

    /// Resource-binding failure detected before any invocation
    /// (missing slot, wrong binding type, undersized buffer, audit violation)
    InvalidBinding(String),

    /// Malformed host object (bad buffer range, fragment out of target
    /// bounds, stream record arity mismatch)
    InvalidResource(String),

    /// Engine or executor singleton lifecycle failure
    InitializationFailed(String),

    /// Executor-internal failure
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InterfaceMismatch(msg) => write!(f, "Interface mismatch: {}", msg),
            Error::InvalidBinding(msg) => write!(f, "Invalid binding: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build a [`BackendError`](Error::BackendError) and log it with file:line
/// information in one step.
#[macro_export]
macro_rules! vela_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::vela_error!($source, "{}", message);
        $crate::vela::Error::BackendError(message)
    }};
}

/// Log and return early with a [`BackendError`](Error::BackendError).
#[macro_export]
macro_rules! vela_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::vela_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
