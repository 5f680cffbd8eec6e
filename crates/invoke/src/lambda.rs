//! HTTP invoker speaking the Lambda `Invoke` REST call.
//!
//! Requests are sent unsigned, which is what local emulators accept. The
//! invocation type is always `RequestResponse`.

use crate::trait_::{InvocationResponse, InvokeError, Invoker, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

const INVOCATION_TYPE_HEADER: &str = "X-Amz-Invocation-Type";
const FUNCTION_ERROR_HEADER: &str = "X-Amz-Function-Error";
const EXECUTED_VERSION_HEADER: &str = "X-Amz-Executed-Version";

/// Configuration for the HTTP invoker.
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Base URL of the invoke API
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Version or alias to invoke (None = `$LATEST`)
    pub qualifier: Option<String>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001".to_string(),
            timeout: Duration::from_secs(60),
            qualifier: None,
        }
    }
}

/// Lambda invoke API client.
#[derive(Clone)]
pub struct LambdaHttpInvoker {
    /// HTTP client
    client: Client,

    /// Endpoint, timeout and qualifier
    config: InvokerConfig,
}

impl LambdaHttpInvoker {
    /// Create a new invoker.
    pub fn new(config: InvokerConfig) -> Result<Self> {
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(InvokeError::Endpoint(format!(
                "{} (expected an http:// or https:// URL)",
                config.endpoint
            )));
        }

        let client = ClientBuilder::new().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    fn invoke_url(&self, function: &str) -> String {
        format!(
            "{}/2015-03-31/functions/{}/invocations",
            self.config.endpoint.trim_end_matches('/'),
            function
        )
    }
}

#[async_trait]
impl Invoker for LambdaHttpInvoker {
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<InvocationResponse> {
        debug!("POST {} ({} bytes)", self.invoke_url(function), payload.len());

        let mut request = self
            .client
            .post(self.invoke_url(function))
            .header(INVOCATION_TYPE_HEADER, "RequestResponse")
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        if let Some(qualifier) = &self.config.qualifier {
            request = request.query(&[("Qualifier", qualifier)]);
        }

        let response = request.send().await?;

        let status = response.status();
        let function_error = header_value(response.headers(), FUNCTION_ERROR_HEADER);
        let executed_version = header_value(response.headers(), EXECUTED_VERSION_HEADER);

        if status.is_client_error() || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            warn!("Invocation of {} rejected with status {}", function, status);
            return Err(InvokeError::Service {
                function: function.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;

        Ok(InvocationResponse {
            status_code: status.as_u16(),
            payload: body.to_vec(),
            function_error,
            executed_version,
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
