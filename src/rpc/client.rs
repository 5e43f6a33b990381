//! JSON-over-HTTP RPC client with per-call deadlines.
//!
//! # Responsibilities
//! - POST one JSON body `{"action": ..., ...params}` per call
//! - Enforce a deadline per call; the in-flight request is dropped on expiry
//! - Classify failures by endpoint class, keeping the low-level cause
//!
//! There is no retry loop: each call yields one response or one classified
//! failure.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::block::types::SendBlock;
use crate::error::{NanoError, NanoResult, RpcFailure, WorkFailure};
use crate::observability::metrics;
use crate::rpc::types::{
    AccountInfo, AccountInfoRequest, Endpoint, ProcessRequest, ProcessResponse,
    WorkGenerateRequest, WorkGenerateResponse,
};

/// Default deadline for node calls.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(60);

/// Default deadline for work generation calls.
pub const DEFAULT_WORK_TIMEOUT: Duration = Duration::from_secs(300);

/// Stateless RPC client. Cloning shares the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    rpc_timeout: Duration,
    work_timeout: Duration,
}

impl Default for RpcClient {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_TIMEOUT, DEFAULT_WORK_TIMEOUT)
    }
}

impl RpcClient {
    /// Create a client with default deadlines for node and work calls.
    pub fn new(rpc_timeout: Duration, work_timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            rpc_timeout,
            work_timeout,
        }
    }

    /// Default deadline for calls to `endpoint`.
    pub fn default_timeout(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::Node => self.rpc_timeout,
            Endpoint::WorkServer => self.work_timeout,
        }
    }

    /// Perform one RPC call.
    ///
    /// # Arguments
    /// * `url` - Endpoint to POST to
    /// * `action` - RPC action name, merged into the body
    /// * `params` - Action fields; must serialize to a JSON object
    /// * `deadline` - Overrides the endpoint's default deadline
    /// * `endpoint` - Node or work server; selects the error class
    pub async fn call<P, T>(
        &self,
        url: &str,
        action: &str,
        params: &P,
        deadline: Option<Duration>,
        endpoint: Endpoint,
    ) -> NanoResult<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let deadline = deadline.unwrap_or_else(|| self.default_timeout(endpoint));
        let started = Instant::now();

        tracing::debug!(
            action = action,
            endpoint = endpoint.as_str(),
            url = %url,
            timeout_ms = deadline.as_millis() as u64,
            "Sending RPC request"
        );

        let result = match request_body(action, params) {
            Ok(body) => self.exchange(url, &body, deadline).await,
            Err(e) => Err(e),
        }
        .and_then(|value| serde_json::from_value::<T>(value).map_err(RpcFailure::Decode));

        metrics::record_rpc_call(action, endpoint.as_str(), result.is_ok(), started.elapsed());

        match result {
            Ok(value) => {
                tracing::debug!(
                    action = action,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "RPC request succeeded"
                );
                Ok(value)
            }
            Err(failure) => {
                tracing::warn!(
                    action = action,
                    endpoint = endpoint.as_str(),
                    error = %failure,
                    "RPC request failed"
                );
                Err(classify(endpoint, action, failure))
            }
        }
    }

    /// Fetch account state, including its representative.
    pub async fn account_info(&self, url: &str, account: &str) -> NanoResult<AccountInfo> {
        self.call(
            url,
            "account_info",
            &AccountInfoRequest::new(account),
            None,
            Endpoint::Node,
        )
        .await
    }

    /// Submit a signed send block; returns its hash.
    pub async fn process_send(&self, url: &str, block: &SendBlock) -> NanoResult<String> {
        let response: ProcessResponse = self
            .call(url, "process", &ProcessRequest::send(block), None, Endpoint::Node)
            .await?;
        Ok(response.hash)
    }

    /// Ask a work server for work over `hash`. The result is not validated here.
    pub async fn work_generate(&self, url: &str, hash: &str) -> NanoResult<String> {
        let response: WorkGenerateResponse = self
            .call(
                url,
                "work_generate",
                &WorkGenerateRequest { hash },
                None,
                Endpoint::WorkServer,
            )
            .await?;
        Ok(response.work)
    }

    async fn exchange(
        &self,
        url: &str,
        body: &Value,
        deadline: Duration,
    ) -> Result<Value, RpcFailure> {
        let request = async {
            let response = self.http.post(url).json(body).send().await?;
            let status = response.status();
            let text = response.text().await?;

            if !status.is_success() {
                return Err(RpcFailure::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let value: Value = serde_json::from_str(&text)?;
            if let Some(error) = value.get("error") {
                let message = error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(RpcFailure::Node(message));
            }
            Ok::<Value, RpcFailure>(value)
        };

        // Dropping the future on expiry cancels the in-flight request.
        match timeout(deadline, request).await {
            Ok(result) => result,
            Err(_) => Err(RpcFailure::Timeout(deadline)),
        }
    }
}

/// Merge `{"action": action}` with the fields of `params`.
fn request_body<P: Serialize + ?Sized>(action: &str, params: &P) -> Result<Value, RpcFailure> {
    let mut body = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(RpcFailure::Decode(serde::ser::Error::custom(format!(
                "RPC params must be a JSON object, got {other}"
            ))))
        }
    };
    body.insert("action".to_string(), Value::String(action.to_string()));
    Ok(Value::Object(body))
}

fn classify(endpoint: Endpoint, action: &str, failure: RpcFailure) -> NanoError {
    match endpoint {
        Endpoint::Node => NanoError::RpcConnection {
            message: format!("failed to call `{action}` on the RPC node"),
            source: failure,
        },
        Endpoint::WorkServer => NanoError::work(
            format!("failed to call `{action}` on the work generation endpoint"),
            WorkFailure::Rpc(failure),
        ),
    }
}
