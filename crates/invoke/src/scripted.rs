//! Scripted in-memory invoker.
//!
//! Answers each function from a queue of canned results and records every
//! call it receives. Used by the test suites and by dry runs.

use crate::trait_::{InvocationResponse, InvokeError, Invoker, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tracing::debug;

/// A call received by [`ScriptedInvoker`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Function name
    pub function: String,
    /// Decoded payload (a JSON string holding the raw text if it was not JSON)
    pub payload: serde_json::Value,
}

/// Invoker answering from per-function queues.
#[derive(Default)]
pub struct ScriptedInvoker {
    responses: Mutex<HashMap<String, VecDeque<Result<InvocationResponse>>>>,
    fallback: Option<InvocationResponse>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedInvoker {
    /// Create an invoker with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an invoker answering every unscripted call with `response`.
    pub fn answering_all(response: InvocationResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    /// Queue a response for `function`.
    pub fn with_response(mut self, function: &str, response: InvocationResponse) -> Self {
        self.responses
            .get_mut()
            .entry(function.to_string())
            .or_default()
            .push_back(Ok(response));
        self
    }

    /// Queue a failure for `function`.
    pub fn with_error(mut self, function: &str, error: InvokeError) -> Self {
        self.responses
            .get_mut()
            .entry(function.to_string())
            .or_default()
            .push_back(Err(error));
        self
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Calls received for one function.
    pub async fn calls_to(&self, function: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.function == function)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Invoker for ScriptedInvoker {
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<InvocationResponse> {
        let payload = serde_json::from_slice(&payload).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&payload).into_owned())
        });
        debug!("Scripted call to {}: {}", function, payload);

        self.calls.lock().await.push(RecordedCall {
            function: function.to_string(),
            payload,
        });

        let queued = self
            .responses
            .lock()
            .await
            .get_mut(function)
            .and_then(|queue| queue.pop_front());

        match (queued, &self.fallback) {
            (Some(result), _) => result,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(InvokeError::Service {
                function: function.to_string(),
                status: 404,
                message: format!("Function not found: {}", function),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_answers_in_queue_order_and_records_calls() {
        let invoker = ScriptedInvoker::new()
            .with_response("signUp", InvocationResponse::json(&json!({"n": 1})))
            .with_response("signUp", InvocationResponse::json(&json!({"n": 2})));

        let first = invoker.invoke("signUp", br#"{"a":1}"#.to_vec()).await.unwrap();
        let second = invoker.invoke("signUp", b"not json".to_vec()).await.unwrap();

        assert_eq!(first.payload, br#"{"n":1}"#.to_vec());
        assert_eq!(second.payload, br#"{"n":2}"#.to_vec());

        let calls = invoker.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].payload, json!({"a": 1}));
        assert_eq!(calls[1].payload, json!("not json"));
    }

    #[tokio::test]
    async fn test_unscripted_function_is_not_found() {
        let invoker = ScriptedInvoker::new();
        let err = invoker.invoke("getOrg", b"{}".to_vec()).await.unwrap_err();
        assert!(matches!(err, InvokeError::Service { status: 404, .. }));
        assert_eq!(invoker.calls_to("getOrg").await.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_answers_everything() {
        let invoker = ScriptedInvoker::answering_all(InvocationResponse::json(&json!({})));
        for name in ["checkLogin", "getUser", "removeTask"] {
            let response = invoker.invoke(name, b"{}".to_vec()).await.unwrap();
            assert!(response.is_ok());
        }
        assert!(invoker.calls_to("createTask").await.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_error_is_returned() {
        let invoker = ScriptedInvoker::new()
            .with_error("completeTask", InvokeError::Other("boom".to_string()));
        let err = invoker.invoke("completeTask", b"{}".to_vec()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
