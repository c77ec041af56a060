//! Error types for the Galaxy3D camera subsystem
//!
//! This module defines the error taxonomy shared by the camera pool,
//! the cameras themselves, and the engine singleton, plus the
//! `engine_err!` / `engine_bail!` helpers that log an error before it
//! is returned.

use std::fmt;

/// Result type for Galaxy3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D errors
///
/// Every variant except `OutOfMemory` carries a human readable message.
/// An error aborts the call that raised it, never the pool or camera:
/// the object stays usable with corrected arguments.
#[derive(Debug, Clone)]
pub enum Error {
    /// A named object with the same name is already registered
    AlreadyExists(String),

    /// No object matches the given name or id
    NotFound(String),

    /// Every slot of a fixed-capacity pool is in use
    CapacityExceeded(String),

    /// Multiview, render pass, pool slot, or query index out of bounds
    IndexOutOfRange(String),

    /// Descriptor values rejected at creation time (zero size, too many views, ...)
    InvalidConfiguration(String),

    /// Backend-specific error (device, lock poisoning, ...)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Initialization failed (engine, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::CapacityExceeded(msg) => write!(f, "Capacity exceeded: {}", msg),
            Error::IndexOutOfRange(msg) => write!(f, "Index out of range: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` variant from a format string and log it at ERROR severity.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::CameraPool", NotFound, "Camera '{}' does not exist", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log an error (see `engine_err!`) and return it from the current function.
///
/// # Example
///
/// ```ignore
/// engine_bail!("galaxy3d::Camera", IndexOutOfRange, "multiview index {} >= {}", index, max);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
