//! Invoker trait abstraction.

use async_trait::async_trait;

/// Error type for invocation operations.
pub type Result<T> = std::result::Result<T, InvokeError>;

/// Errors that can occur while invoking a remote function.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// HTTP transport error (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The invocation service rejected the call
    #[error("Invocation of {function} failed with status {status}: {message}")]
    Service {
        /// Function that was invoked
        function: String,
        /// Status code returned by the service
        status: u16,
        /// Error text returned by the service
        message: String,
    },

    /// The configured endpoint cannot be used
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Raw result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResponse {
    /// Status code reported by the invocation service
    pub status_code: u16,

    /// Raw response payload
    pub payload: Vec<u8>,

    /// Set when the function itself raised; the payload then holds the error
    pub function_error: Option<String>,

    /// Function version that handled the call
    pub executed_version: Option<String>,
}

impl InvocationResponse {
    /// Status code of a synchronous invocation that completed.
    pub const STATUS_OK: u16 = 200;

    /// Create a response with the given status and payload.
    pub fn new(status_code: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            payload: payload.into(),
            function_error: None,
            executed_version: None,
        }
    }

    /// A `200` response carrying `payload` serialized as JSON.
    pub fn json(payload: &serde_json::Value) -> Self {
        Self::new(Self::STATUS_OK, payload.to_string())
    }

    /// Mark the response as a function error.
    pub fn with_function_error(mut self, kind: impl Into<String>) -> Self {
        self.function_error = Some(kind.into());
        self
    }

    /// Whether the status code is exactly `200`.
    pub fn is_ok(&self) -> bool {
        self.status_code == Self::STATUS_OK
    }
}

/// Client able to invoke a named remote function.
///
/// Implementations must be reusable across calls; callers share one handle
/// behind an `Arc`.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invoke `function` with a JSON-encoded `payload` and wait for its response.
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<InvocationResponse>;
}
