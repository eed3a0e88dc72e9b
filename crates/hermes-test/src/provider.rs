//! Scripted wallet backend.

use hermes_core::{BoxFuture, JsonRpcRequest, Provider, SigningProvider};
use serde_json::Value;
use std::sync::Mutex;

/// A wallet backend scripted with a single canned outcome.
///
/// Every capability call is recorded in a human-readable form so tests can
/// assert which sub-operation the pipeline actually chose, not just the
/// final context state.
pub struct MockProvider {
    outcome: Result<Value, String>,
    requests: Mutex<Vec<String>>,
}

impl MockProvider {
    /// A provider whose every call succeeds with the given result payload.
    #[must_use]
    pub fn returning(result: Value) -> Self {
        Self {
            outcome: Ok(result),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose every call fails with the given message.
    ///
    /// An empty message produces an error that carries no text of its own,
    /// which exercises the pipeline's fallback messages.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The calls this provider has serviced, in order.
    ///
    /// Raw requests record their method name; signing sub-operations record
    /// their name and arguments, e.g. `"sign_personal_message(0xdead, 0xaddr)"`.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    fn record(&self, call: String) -> anyhow::Result<Value> {
        self.requests.lock().expect("request log poisoned").push(call);
        match &self.outcome {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

impl Provider for MockProvider {
    fn request<'a>(&'a self, request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<Value>> {
        let outcome = self.record(request.method.clone());
        Box::pin(async move { outcome })
    }
}

impl SigningProvider for MockProvider {
    fn sign_personal_message<'a>(
        &'a self,
        data: &'a str,
        address: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Value>> {
        let outcome = self.record(format!("sign_personal_message({data}, {address})"));
        Box::pin(async move { outcome })
    }

    fn sign_typed_data<'a>(
        &'a self,
        data: &'a str,
        address: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Value>> {
        let outcome = self.record(format!("sign_typed_data({data}, {address})"));
        Box::pin(async move { outcome })
    }

    fn send_raw_request<'a>(
        &'a self,
        request: &'a JsonRpcRequest,
    ) -> BoxFuture<'a, anyhow::Result<Value>> {
        let outcome = self.record(format!("send_raw_request({})", request.method));
        Box::pin(async move { outcome })
    }
}
