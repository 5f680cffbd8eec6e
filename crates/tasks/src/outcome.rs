//! Facade result record.

use samaritan_calls::{CallError, FaultKind};
use serde::Serialize;
use serde_json::Value;

/// Outcome of a task operation.
///
/// Serializes to `{"message", "data"}` on success and `{"error", "message"}`
/// on failure. The fault category is kept for callers but not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskOutcome {
    /// The call returned a value.
    Success {
        /// Fixed success message for the operation
        message: String,
        /// Decoded response of the remote function
        data: Value,
    },
    /// The call failed.
    Failure {
        /// Text of the fault
        error: String,
        /// Fixed failure message for the operation
        message: String,
        /// Category of the fault
        #[serde(skip)]
        kind: FaultKind,
    },
}

impl TaskOutcome {
    /// Build a success record.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        TaskOutcome::Success {
            message: message.into(),
            data,
        }
    }

    /// Build a failure record from a call error.
    pub fn failure(message: impl Into<String>, error: &CallError) -> Self {
        TaskOutcome::Failure {
            error: error.to_string(),
            message: message.into(),
            kind: error.kind(),
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            TaskOutcome::Success { message, .. } | TaskOutcome::Failure { message, .. } => message,
        }
    }

    /// Fault category, if the call failed.
    pub fn fault(&self) -> Option<FaultKind> {
        match self {
            TaskOutcome::Success { .. } => None,
            TaskOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Convert into a plain `Result`.
    pub fn into_result(self) -> Result<Value, (FaultKind, String)> {
        match self {
            TaskOutcome::Success { data, .. } => Ok(data),
            TaskOutcome::Failure { error, kind, .. } => Err((kind, error)),
        }
    }
}
