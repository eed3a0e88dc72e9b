//! Per-request context.
//!
//! A [`RequestContext`] is created once per wallet call and passed by
//! exclusive mutable reference through every middleware in a chain. It
//! carries the immutable request arguments in, and the finalized
//! result/error out.
//!
//! ## Single resolution
//!
//! The context transitions from writeable to non-writeable exactly once,
//! on the first [`write`](RequestContext::write). Later writes are silent
//! no-ops, and none of the observable state (`result`, `error`, the derived
//! `response`) is visible before that transition, so a middleware earlier
//! in the chain can never observe a half-finished result produced further
//! down.

use hermes_core::{
    EncodedError, HermesError, JsonRpcRequest, JsonRpcResponse, ProviderType, RequestArguments,
    RequestId, RequestOptions, SendOverrides,
};
use serde_json::Value;
use std::sync::Arc;

/// The message reported when a request fails without any usable detail.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Failed to send request.";

/// An observer invoked once with the final `(error, response)` pair.
pub type ResponseCallback = Arc<dyn Fn(Option<&HermesError>, Option<&JsonRpcResponse>) + Send + Sync>;

/// Mutable per-request record flowing through a middleware chain.
///
/// # Example
///
/// ```
/// use hermes_core::{ProviderType, RequestArguments};
/// use hermes_middleware::RequestContext;
/// use serde_json::json;
///
/// let mut ctx = RequestContext::new(
///     ProviderType::MetaMask,
///     RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")]),
/// );
///
/// assert!(ctx.writeable());
/// ctx.end(json!("0xsignature"));
/// assert_eq!(ctx.result(), Some(&json!("0xsignature")));
/// ```
pub struct RequestContext {
    /// Process-unique identifier, assigned at creation.
    id: RequestId,

    /// Which wallet backend this request targets. Never mutated.
    provider_type: ProviderType,

    /// Caller-supplied method and parameters. Never mutated.
    arguments: RequestArguments,

    /// Per-call overrides.
    overrides: SendOverrides,

    /// Per-call behavioral options.
    options: RequestOptions,

    /// True until the first terminal write.
    writeable: bool,

    /// The normalized error, stored at finalize time.
    error: Option<HermesError>,

    /// The success payload, stored at finalize time.
    result: Option<Value>,

    /// Human-readable message used when a failure carries no usable one.
    fallback_message: String,

    /// Observers fired once, at finalize time, in registration order.
    callbacks: Vec<ResponseCallback>,
}

impl RequestContext {
    /// Creates a context for one wallet call, assigning a fresh request ID.
    #[must_use]
    pub fn new(provider_type: ProviderType, arguments: RequestArguments) -> Self {
        Self {
            id: RequestId::next(),
            provider_type,
            arguments,
            overrides: SendOverrides::default(),
            options: RequestOptions::default(),
            writeable: true,
            error: None,
            result: None,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            callbacks: Vec::new(),
        }
    }

    /// Attaches per-call overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SendOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Attaches per-call options.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the targeted wallet backend.
    #[must_use]
    pub fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    /// Returns the caller-supplied request arguments.
    #[must_use]
    pub fn request_arguments(&self) -> &RequestArguments {
        &self.arguments
    }

    /// Returns the per-call overrides.
    #[must_use]
    pub fn overrides(&self) -> &SendOverrides {
        &self.overrides
    }

    /// Returns the per-call options.
    #[must_use]
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Returns `true` until the context is finalized.
    #[must_use]
    pub fn writeable(&self) -> bool {
        self.writeable
    }

    /// Derives the full JSON-RPC request sent to providers.
    #[must_use]
    pub fn request(&self) -> JsonRpcRequest {
        JsonRpcRequest::new(self.id, &self.arguments)
    }

    /// Returns the success payload, or `None` while the context is still
    /// writeable or when the request failed without one.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        if self.writeable {
            return None;
        }
        self.result.as_ref()
    }

    /// Derives the JSON-RPC response, or `None` while the context is still
    /// writeable.
    #[must_use]
    pub fn response(&self) -> Option<JsonRpcResponse> {
        if self.writeable {
            return None;
        }
        Some(JsonRpcResponse::new(
            self.id,
            self.result.clone().unwrap_or(Value::Null),
        ))
    }

    /// Returns the normalized failure, or `None` while the context is still
    /// writeable and for successful requests.
    #[must_use]
    pub fn error(&self) -> Option<&HermesError> {
        if self.writeable {
            return None;
        }
        self.error.as_ref()
    }

    /// Finalizes the context. First call wins.
    ///
    /// Stores the error/result pair, transitions the context to
    /// non-writeable, and synchronously fires every registered callback
    /// with the final `(error, response)` pair. Later calls are silently
    /// ignored, whatever their arguments.
    pub fn write(&mut self, error: Option<HermesError>, result: Option<Value>) {
        if !self.writeable {
            tracing::debug!(id = %self.id, "write ignored: context already finalized");
            return;
        }
        self.writeable = false;
        self.result = result;
        self.error = self.normalize_error(error);

        let response = self.response();
        let callbacks = std::mem::take(&mut self.callbacks);
        for callback in &callbacks {
            callback(self.error.as_ref(), response.as_ref());
        }
    }

    /// Finalizes the context with a success payload.
    pub fn end(&mut self, result: Value) {
        self.write(None, Some(result));
    }

    /// Finalizes the context with a backend failure.
    ///
    /// The failure's own message is reported when it has one; `fallback`
    /// replaces it otherwise, and also becomes the context's fallback for
    /// the error-normalization rules.
    pub fn abort(&mut self, error: impl Into<anyhow::Error>, fallback: impl Into<String>) {
        if !self.writeable {
            return;
        }
        self.fallback_message = fallback.into();
        let source = error.into();
        let message = source.to_string();
        let error = if message.is_empty() {
            HermesError::Provider {
                message: self.fallback_message.clone(),
                source: Some(source),
            }
        } else {
            HermesError::Provider {
                message,
                source: Some(source),
            }
        };
        self.write(Some(error), None);
    }

    /// Registers an observer for the final `(error, response)` pair.
    ///
    /// Registration order is invocation order; registering the same
    /// callback (the same `Arc`) twice is a no-op. A callback registered
    /// after the context has already finalized fires immediately with the
    /// stored pair, so no notification is ever dropped.
    pub fn on_response(&mut self, callback: ResponseCallback) {
        if !self.writeable {
            let response = self.response();
            callback(self.error.as_ref(), response.as_ref());
            return;
        }
        if !self
            .callbacks
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &callback))
        {
            self.callbacks.push(callback);
        }
    }

    /// Collapses an explicit error and a protocol-level encoded error into
    /// the one reported failure.
    ///
    /// An explicit error wins and keeps its own message unless that message
    /// is empty. Absent an explicit error, a present `"error"` member in
    /// the result payload counts as a failure even when it carries no
    /// message of its own.
    fn normalize_error(&self, explicit: Option<HermesError>) -> Option<HermesError> {
        match explicit {
            Some(HermesError::Provider { message, source }) if message.is_empty() => {
                Some(HermesError::Provider {
                    message: self.fallback_message.clone(),
                    source,
                })
            }
            Some(error) => Some(error),
            None => self
                .result
                .as_ref()
                .and_then(EncodedError::probe)
                .map(|encoded| {
                    HermesError::provider(encoded.message_or(&self.fallback_message))
                }),
        }
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("id", &self.id)
            .field("provider_type", &self.provider_type)
            .field("method", &self.arguments.method)
            .field("writeable", &self.writeable)
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}
