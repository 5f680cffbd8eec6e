//! Call error types.

use samaritan_invoke::InvokeError;
use std::fmt;

/// Result type for call operations.
pub type Result<T> = std::result::Result<T, CallError>;

/// Errors raised by the call wrappers.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The invocation itself failed
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    /// A payload could not be encoded or a response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response decoded but is not shaped as the function promises
    #[error("Unexpected response from {function}: {reason}")]
    Shape {
        /// Function that produced the response
        function: String,
        /// What was wrong with it
        reason: String,
    },

    /// Snapshot file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CallError {
    /// Category of this error.
    pub fn kind(&self) -> FaultKind {
        match self {
            CallError::Invoke(_) => FaultKind::Transport,
            CallError::Json(_) | CallError::Shape { .. } => FaultKind::Decode,
            CallError::Io(_) => FaultKind::Io,
        }
    }

    pub(crate) fn shape(function: impl fmt::Display, reason: impl Into<String>) -> Self {
        CallError::Shape {
            function: function.to_string(),
            reason: reason.into(),
        }
    }
}

/// Broad category of a call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The remote function could not be reached or rejected the call
    Transport,
    /// The response could not be decoded
    Decode,
    /// Local file access failed
    Io,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Transport => write!(f, "transport"),
            FaultKind::Decode => write!(f, "decode"),
            FaultKind::Io => write!(f, "io"),
        }
    }
}
