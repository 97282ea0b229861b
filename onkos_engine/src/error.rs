//! Error types for the Onkos engine
//!
//! This module defines the error type shared by mesh ingestion, GPU buffer
//! creation and per-frame pipeline binding.

use std::fmt;

/// Result type for Onkos engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status reported by a native graphics call
///
/// Device capabilities return this instead of an engine `Error` so the native
/// status code survives until the engine decides how to classify the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    /// Native status code (HRESULT-style, negative on failure)
    pub code: i32,
    /// Human readable description from the backend
    pub message: String,
}

impl NativeError {
    /// Generic failure (`E_FAIL`)
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
    /// Invalid argument (`E_INVALIDARG`)
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    /// Out of memory (`E_OUTOFMEMORY`)
    pub const E_OUTOFMEMORY: i32 = 0x8007_000E_u32 as i32;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code 0x{:08X})", self.message, self.code as u32)
    }
}

impl std::error::Error for NativeError {}

/// Result type for native device calls
pub type NativeResult<T> = std::result::Result<T, NativeError>;

/// Onkos engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// OBJ file missing or unreadable
    NotFound {
        path: String,
        reason: String,
    },

    /// A numeric token in an OBJ record failed to parse
    MalformedNumber {
        line: usize,
        token: String,
    },

    /// A face record is structurally invalid (missing corner indices,
    /// out-of-range references, unsupported corner count)
    MalformedFace {
        line: usize,
        reason: String,
    },

    /// GPU resource allocation failed
    CreationError {
        resource: String,
        code: i32,
        message: String,
    },

    /// Operation invoked on a resource that is not initialized or already destroyed
    PreconditionError(String),

    /// A device-context call failed inside the backend
    BackendError(String),
}

impl Error {
    /// Build a `CreationError` from a native status
    pub fn creation(resource: impl Into<String>, native: NativeError) -> Self {
        Error::CreationError {
            resource: resource.into(),
            code: native.code,
            message: native.message,
        }
    }

    /// True for the three OBJ parse failure kinds
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::MalformedNumber { .. } | Error::MalformedFace { .. }
        )
    }

    /// Native status code carried by a `CreationError`
    pub fn native_code(&self) -> Option<i32> {
        match self {
            Error::CreationError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { path, reason } => write!(f, "Not found: '{}' ({})", path, reason),
            Error::MalformedNumber { line, token } => {
                write!(f, "Malformed number on line {}: '{}'", line, token)
            }
            Error::MalformedFace { line, reason } => {
                write!(f, "Malformed face on line {}: {}", line, reason)
            }
            Error::CreationError { resource, code, message } => write!(
                f,
                "Creation error: {} could not be created: {} (code 0x{:08X})",
                resource, message, *code as u32
            ),
            Error::PreconditionError(msg) => write!(f, "Precondition error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<NativeError> for Error {
    fn from(native: NativeError) -> Self {
        Error::BackendError(native.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log a precondition failure and evaluate to the matching `Error`
///
/// # Example
///
/// ```no_run
/// # use onkos_engine::engine_precondition;
/// let err = engine_precondition!("onkos::GpuBuffer", "bind called on destroyed buffer '{}'", "cube_vb");
/// ```
#[macro_export]
macro_rules! engine_precondition {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::onkos::Error::PreconditionError(message)
    }};
}

/// Log a precondition failure and return it from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_precondition!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
