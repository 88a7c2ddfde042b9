//! Error types for frame hooks
//!
//! This module defines the error types used by the before-render dispatcher
//! and the frame loop that drives it.

use std::fmt;

/// Result type for frame hook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frame hook errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A before-render callback reported a failure
    CallbackFailed(String),

    /// Configuration rejected at construction time
    InvalidConfig(String),

    /// The render step of a frame failed
    FrameFailed {
        /// Index of the frame that failed
        frame: u64,
        /// Failure description
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CallbackFailed(msg) => write!(f, "Callback failed: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::FrameFailed { frame, reason } => {
                write!(f, "Frame {} failed: {}", frame, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR with file:line and build an `Error::CallbackFailed`
///
/// # Example
///
/// ```no_run
/// # use frame_hooks::hooks_err;
/// let err = hooks_err!("game::Streaming", "Texture pool exhausted ({} pending)", 3);
/// ```
#[macro_export]
macro_rules! hooks_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::hooks::Error::CallbackFailed(message)
    }};
}

/// Log an ERROR and return early with an `Error::CallbackFailed`
///
/// # Example
///
/// ```no_run
/// # use frame_hooks::hooks_bail;
/// fn upload() -> frame_hooks::hooks::Result<()> {
///     hooks_bail!("game::Streaming", "Upload queue closed");
/// }
/// ```
#[macro_export]
macro_rules! hooks_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::hooks_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
