//! Invocation helper and response unwrapping.

use crate::error::{CallError, Result};
use samaritan_core::{InvocationId, RemoteFunction, ResponseShape};
use samaritan_invoke::{InvocationResponse, Invoker};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared handle used by the call wrappers to reach remote functions.
#[derive(Clone)]
pub struct RemoteCaller {
    invoker: Arc<dyn Invoker>,
}

impl RemoteCaller {
    /// Wrap an invoker.
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self { invoker }
    }

    /// Serialize `payload`, invoke `function` and return the raw response.
    pub async fn call<P>(&self, function: RemoteFunction, payload: &P) -> Result<InvocationResponse>
    where
        P: Serialize + ?Sized + Sync,
    {
        let id = InvocationId::new();
        let body = serde_json::to_vec(payload)?;

        debug!("Invoking {} [{}]", function, id);
        let response = self.invoker.invoke(function.name(), body).await?;
        debug!("{} [{}] returned status {}", function, id, response.status_code);

        if let Some(kind) = &response.function_error {
            warn!("{} [{}] reported a function error: {}", function, id, kind);
        }

        Ok(response)
    }

    /// Invoke `function` and unwrap its response by the function's shape.
    pub async fn fetch<P>(&self, function: RemoteFunction, payload: &P) -> Result<Value>
    where
        P: Serialize + ?Sized + Sync,
    {
        let response = self.call(function, payload).await?;
        unwrap_response(function, &response)
    }
}

/// Unwrap a response according to `function`'s response shape.
///
/// `Status` functions yield `null`; their payload is never decoded.
pub fn unwrap_response(function: RemoteFunction, response: &InvocationResponse) -> Result<Value> {
    match function.shape() {
        ResponseShape::Direct => Ok(serde_json::from_slice(&response.payload)?),
        ResponseShape::Enveloped => unwrap_envelope(function, &response.payload),
        ResponseShape::Status => Ok(Value::Null),
    }
}

fn unwrap_envelope(function: RemoteFunction, payload: &[u8]) -> Result<Value> {
    let outer: Value = serde_json::from_slice(payload)?;
    let Some(envelope) = outer.as_object() else {
        return Err(CallError::shape(function, "envelope is not an object"));
    };

    if let Some(status) = envelope.get("statusCode") {
        debug!("{} envelope status {}", function, status);
    }

    match envelope.get("body") {
        None => Ok(Value::Object(Default::default())),
        Some(Value::String(body)) => Ok(serde_json::from_str(body)?),
        Some(_) => Err(CallError::shape(function, "body is not a JSON string")),
    }
}

/// Take `field` out of an object, falling back to `default` when absent.
pub(crate) fn take_field(
    function: RemoteFunction,
    mut value: Value,
    field: &str,
    default: Value,
) -> Result<Value> {
    match value.as_object_mut() {
        Some(object) => Ok(object.remove(field).unwrap_or(default)),
        None => Err(CallError::shape(
            function,
            format!("expected an object holding `{}`", field),
        )),
    }
}
