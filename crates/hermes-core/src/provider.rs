//! Provider capabilities.
//!
//! The pipeline treats wallet backends as opaque capabilities: at minimum a
//! backend can service a raw JSON-RPC request ([`Provider`]); some expose
//! richer sub-operations with backend-specific parameter shapes
//! ([`SigningProvider`]). The core forwards parameters unchanged and never
//! interprets results beyond the protocol-level error probe.

use crate::request::JsonRpcRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// A boxed future, the return type of every capability and middleware
/// dispatch in Hermes.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Which wallet backend an in-flight request targets.
///
/// Fixed at context creation; the provider router keys its chain table on
/// this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// No wallet is connected.
    Disconnected,
    /// A provider injected into the page by a browser wallet.
    Injected,
    /// The MetaMask extension provider.
    MetaMask,
    /// A WalletConnect session.
    WalletConnect,
    /// The Fortmatic SDK provider.
    Fortmatic,
}

impl ProviderType {
    /// Returns the provider type's stable name, as used in logs and
    /// serialized configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Injected => "injected",
            Self::MetaMask => "metamask",
            Self::WalletConnect => "walletconnect",
            Self::Fortmatic => "fortmatic",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The minimum capability every wallet backend exposes.
///
/// Implementations live outside the core pipeline (extension messaging,
/// hardware wallets, network round trips); the pipeline only awaits the
/// returned future.
pub trait Provider: Send + Sync + 'static {
    /// Services a raw JSON-RPC request, returning the result payload.
    fn request<'a>(&'a self, request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<Value>>;
}

/// Richer sub-operations some backends expose alongside [`Provider`].
///
/// Parameter shapes are backend-specific; the built-in signer interceptor
/// forwards them unchanged.
pub trait SigningProvider: Provider {
    /// Signs an arbitrary personal message for the given address.
    fn sign_personal_message<'a>(
        &'a self,
        data: &'a str,
        address: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Value>>;

    /// Signs EIP-712 structured data for the given address.
    fn sign_typed_data<'a>(
        &'a self,
        data: &'a str,
        address: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<Value>>;

    /// Sends a raw request over the backend's own transport.
    fn send_raw_request<'a>(
        &'a self,
        request: &'a JsonRpcRequest,
    ) -> BoxFuture<'a, anyhow::Result<Value>>;
}

/// A user-facing confirmation surface.
///
/// The confirmation gate middleware consults this capability before letting
/// a signing or transaction request reach a backend. The surface itself
/// (popup, native dialog) is a collaborator outside the pipeline.
pub trait UserPrompt: Send + Sync + 'static {
    /// Asks the user to approve the request. `Ok(false)` is a rejection.
    fn confirm<'a>(&'a self, request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<bool>>;
}
