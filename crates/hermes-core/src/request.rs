//! Request-side wire types.
//!
//! A caller describes a wallet call with [`RequestArguments`] (method name
//! plus ordered parameters). The pipeline stamps it with a [`RequestId`] and
//! derives the full JSON-RPC 2.0 [`JsonRpcRequest`] sent to providers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// The JSON-RPC protocol version carried by every request and response.
pub const JSONRPC_VERSION: &str = "2.0";

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique, monotonically increasing request identifier.
///
/// Assigned once when a request context is created and reused as the
/// JSON-RPC `id` field, so a response can always be correlated with the
/// request that produced it.
///
/// # Example
///
/// ```
/// use hermes_core::RequestId;
///
/// let a = RequestId::next();
/// let b = RequestId::next();
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Allocates the next request ID from the process-wide counter.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a `RequestId` from a raw value.
    ///
    /// Useful when replaying a request captured elsewhere.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wallet methods the built-in interceptors understand.
///
/// Requests may carry any method string; interceptors pattern-match on the
/// parsed variant and pass everything else down the chain untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EthMethod {
    /// `personal_sign` - sign an arbitrary message with an account key.
    PersonalSign,
    /// `eth_signTypedData_v4` - sign EIP-712 structured data.
    SignTypedData,
    /// `eth_sendTransaction` - sign and broadcast a transaction.
    SendTransaction,
    /// `eth_accounts` - list the accounts the wallet exposes.
    EthAccounts,
    /// `eth_chainId` - the chain the wallet is connected to.
    EthChainId,
}

impl EthMethod {
    /// Returns the canonical JSON-RPC method string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonalSign => "personal_sign",
            Self::SignTypedData => "eth_signTypedData_v4",
            Self::SendTransaction => "eth_sendTransaction",
            Self::EthAccounts => "eth_accounts",
            Self::EthChainId => "eth_chainId",
        }
    }

    /// Parses a method string into a known variant.
    ///
    /// Returns `None` for methods the built-in interceptors do not handle.
    #[must_use]
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "personal_sign" => Some(Self::PersonalSign),
            "eth_signTypedData_v4" => Some(Self::SignTypedData),
            "eth_sendTransaction" => Some(Self::SendTransaction),
            "eth_accounts" => Some(Self::EthAccounts),
            "eth_chainId" => Some(Self::EthChainId),
            _ => None,
        }
    }

    /// Returns `true` if the method needs explicit user approval before it
    /// may reach a wallet backend.
    #[must_use]
    pub const fn requires_approval(self) -> bool {
        matches!(
            self,
            Self::PersonalSign | Self::SignTypedData | Self::SendTransaction
        )
    }
}

impl std::fmt::Display for EthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller-supplied portion of a request: method name and ordered
/// parameter list.
///
/// Immutable once a context is created; interceptors read it to decide
/// whether to handle the request or delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArguments {
    /// The JSON-RPC method name.
    pub method: String,

    /// Ordered, method-specific parameters.
    #[serde(default)]
    pub params: Vec<Value>,
}

impl RequestArguments {
    /// Creates request arguments from a method name and parameter list.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Parses the method string into a known wallet method, if it is one.
    #[must_use]
    pub fn known_method(&self) -> Option<EthMethod> {
        EthMethod::parse(&self.method)
    }
}

/// A full JSON-RPC 2.0 request as sent to a provider backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Correlation identifier, taken from the owning context.
    pub id: RequestId,

    /// Protocol version, always [`JSONRPC_VERSION`].
    pub jsonrpc: String,

    /// The method name.
    pub method: String,

    /// Ordered parameters.
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    /// Builds a request from a context id and its request arguments.
    #[must_use]
    pub fn new(id: RequestId, arguments: &RequestArguments) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: arguments.method.clone(),
            params: arguments.params.clone(),
        }
    }

    /// Parses the method string into a known wallet method, if it is one.
    #[must_use]
    pub fn known_method(&self) -> Option<EthMethod> {
        EthMethod::parse(&self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_ids_are_monotonic() {
        let ids: Vec<RequestId> = (0..8).map(|_| RequestId::next()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn request_id_serializes_as_integer() {
        let id = RequestId::from_raw(42);
        assert_eq!(serde_json::to_value(id).unwrap(), json!(42));
    }

    #[test]
    fn method_strings_round_trip() {
        for method in [
            EthMethod::PersonalSign,
            EthMethod::SignTypedData,
            EthMethod::SendTransaction,
            EthMethod::EthAccounts,
            EthMethod::EthChainId,
        ] {
            assert_eq!(EthMethod::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn unknown_method_is_not_parsed() {
        assert_eq!(EthMethod::parse("eth_foo"), None);

        let args = RequestArguments::new("eth_foo", vec![]);
        assert!(args.known_method().is_none());
    }

    #[test]
    fn approval_is_required_for_signing_and_sending() {
        assert!(EthMethod::PersonalSign.requires_approval());
        assert!(EthMethod::SignTypedData.requires_approval());
        assert!(EthMethod::SendTransaction.requires_approval());
        assert!(!EthMethod::EthAccounts.requires_approval());
        assert!(!EthMethod::EthChainId.requires_approval());
    }

    #[test]
    fn request_is_derived_from_arguments() {
        let args = RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")]);
        let request = JsonRpcRequest::new(RequestId::from_raw(7), &args);

        assert_eq!(request.id, RequestId::from_raw(7));
        assert_eq!(request.jsonrpc, JSONRPC_VERSION);
        assert_eq!(request.method, "personal_sign");
        assert_eq!(request.params, vec![json!("0xdead"), json!("0xaddr")]);
        assert_eq!(request.known_method(), Some(EthMethod::PersonalSign));
    }

    #[test]
    fn request_serializes_with_protocol_version() {
        let args = RequestArguments::new("eth_chainId", vec![]);
        let request = JsonRpcRequest::new(RequestId::from_raw(1), &args);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 1);
        assert_eq!(value["method"], "eth_chainId");
    }
}
