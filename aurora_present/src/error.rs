//! Error types for the Aurora presentation engine
//!
//! This module defines the error types used throughout the engine,
//! including presentation, initialization, and device submission.

use std::fmt;

/// Result type for Aurora presentation engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Aurora presentation engine errors
///
/// Recoverable presentation conditions (surface out of date, suboptimal,
/// minimized drawable) are not errors; they are ordinary outcome values
/// returned by the orchestrator. An `Error` always means the current run
/// cannot continue.
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Operation called in a lifecycle state that forbids it
    /// (e.g. iterating a retired orchestrator, rebuilding a retired surface)
    InvalidState(String),

    /// Initialization failed (device context, frame pool, presentation surface)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
