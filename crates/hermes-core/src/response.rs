//! Response-side wire types.
//!
//! A finalized context derives a [`JsonRpcResponse`] from its written
//! result. Some backends report failure inside the payload instead of
//! rejecting the call; [`JsonRpcResponse::encoded_error`] probes for that
//! protocol-level error member.

use crate::request::{RequestId, JSONRPC_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Correlation identifier, echoing the request's id.
    pub id: RequestId,

    /// Protocol version, always [`JSONRPC_VERSION`].
    pub jsonrpc: String,

    /// The result payload. `Null` when the request was aborted without one.
    pub result: Value,
}

impl JsonRpcResponse {
    /// Builds a response for the given request id.
    #[must_use]
    pub fn new(id: RequestId, result: Value) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
        }
    }

    /// Probes the result payload for a protocol-level error member.
    ///
    /// A result object that carries an `"error"` member encodes a failure
    /// even when that member is empty, `null`, or has no message; presence
    /// alone is what marks the response as failed. Callers that want a
    /// human-readable message combine [`EncodedError::message`] with their
    /// own fallback.
    #[must_use]
    pub fn encoded_error(&self) -> Option<EncodedError> {
        EncodedError::probe(&self.result)
    }
}

/// A protocol-level error extracted from a response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedError {
    /// Numeric error code, when the backend supplied one.
    pub code: Option<i64>,

    /// Human-readable message, when the backend supplied one.
    pub message: Option<String>,
}

impl EncodedError {
    /// Probes a result payload for a protocol-level `"error"` member.
    ///
    /// Same semantics as [`JsonRpcResponse::encoded_error`], usable before
    /// a response has been derived.
    #[must_use]
    pub fn probe(result: &Value) -> Option<Self> {
        let error = result.as_object()?.get("error")?;
        Some(Self {
            code: error.get("code").and_then(Value::as_i64),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    /// Returns the encoded message if it is present and non-empty,
    /// otherwise the supplied fallback.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_has_no_encoded_error() {
        let response = JsonRpcResponse::new(RequestId::from_raw(1), json!("0xsignature"));
        assert!(response.encoded_error().is_none());

        let response = JsonRpcResponse::new(RequestId::from_raw(2), json!({"status": "ok"}));
        assert!(response.encoded_error().is_none());
    }

    #[test]
    fn error_member_is_extracted() {
        let response = JsonRpcResponse::new(
            RequestId::from_raw(3),
            json!({"error": {"code": -32000, "message": "execution reverted"}}),
        );

        let error = response.encoded_error().unwrap();
        assert_eq!(error.code, Some(-32000));
        assert_eq!(error.message_or("fallback"), "execution reverted");
    }

    #[test]
    fn present_but_empty_error_member_still_counts() {
        // Presence of the member marks the response as failed, even when
        // the member itself carries nothing usable.
        for result in [json!({"error": {}}), json!({"error": null}), json!({"error": {"message": ""}})] {
            let response = JsonRpcResponse::new(RequestId::from_raw(4), result);
            let error = response.encoded_error().expect("error member is present");
            assert_eq!(error.message_or("fallback"), "fallback");
        }
    }

    #[test]
    fn non_object_results_are_never_errors() {
        for result in [json!(null), json!("error"), json!([1, 2, 3]), json!(7)] {
            let response = JsonRpcResponse::new(RequestId::from_raw(5), result);
            assert!(response.encoded_error().is_none());
        }
    }

    #[test]
    fn response_serializes_with_protocol_version() {
        let response = JsonRpcResponse::new(RequestId::from_raw(9), json!("0xsignature"));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], 9);
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["result"], "0xsignature");
    }
}
