//! # Hermes
//!
//! **Request-interception middleware pipeline for wallet/RPC requests**
//!
//! Hermes routes outgoing wallet calls through an ordered chain of
//! middleware before they reach an underlying wallet backend:
//!
//! - **Single resolution** - every request context is finalized exactly once
//! - **Onion dispatch** - middleware wrap the downstream chain and observe
//!   its outcome
//! - **Provider routing** - a composer-of-composers selects the chain for
//!   whichever wallet backend the request targets
//! - **Fail-safe errors** - backend failures become user-presentable
//!   messages, never panics
//!
//! ## Quick Start
//!
//! ```
//! use hermes::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use hermes_test::{ApproveAllPrompt, MockProvider};
//! # let prompt = Arc::new(ApproveAllPrompt);
//! # let wallet = Arc::new(MockProvider::returning(json!("0xsignature")));
//! let router = Interceptor::builder()
//!     .route_single(ProviderType::Disconnected, DisconnectedInterceptor)
//!     .route_single(ProviderType::WalletConnect, SignerInterceptor::new(wallet))
//!     .build();
//!
//! let pipeline = Composer::new()
//!     .with(LoggingMiddleware::default())
//!     .with(ConfirmationGate::new(prompt))
//!     .with(router);
//!
//! let mut ctx = RequestContext::new(
//!     ProviderType::WalletConnect,
//!     RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")]),
//! );
//! pipeline.dispatch(&mut ctx, &UnsupportedMethodFallback).await?;
//!
//! assert_eq!(ctx.result(), Some(&json!("0xsignature")));
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the wire model and capability traits
pub use hermes_core as core;

// Re-export the pipeline engine and built-in stages
pub use hermes_middleware as middleware;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_core::{
        BoxFuture, EthMethod, HermesError, HermesResult, JsonRpcRequest, JsonRpcResponse,
        Provider, ProviderType, RequestArguments, RequestId, RequestOptions, SendOverrides,
        SigningProvider, UserPrompt,
    };

    pub use hermes_middleware::{
        Composer, Interceptor, InterceptorBuilder, Middleware, Next, NoopFallback,
        RequestContext, Terminal, UnsupportedMethodFallback,
    };

    // Re-export the built-in stages
    pub use hermes_middleware::stages::{
        BaseInterceptor, ConfirmationGate, DisconnectedInterceptor, LoggingMiddleware,
        SignerInterceptor,
    };
}
