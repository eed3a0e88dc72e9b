//! # Hermes Test
//!
//! Test utilities for the Hermes middleware pipeline: scripted wallet
//! backends, canned confirmation surfaces, and chain-order recorders.
//! Nothing here touches a real wallet or a network.
//!
//! ## Example
//!
//! ```
//! use hermes_core::ProviderType;
//! use hermes_core::RequestArguments;
//! use hermes_middleware::stages::SignerInterceptor;
//! use hermes_middleware::{Composer, RequestContext, UnsupportedMethodFallback};
//! use hermes_test::MockProvider;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::returning(json!("0xsignature")));
//! let composer = Composer::new().with(SignerInterceptor::new(provider.clone()));
//!
//! let mut ctx = RequestContext::new(
//!     ProviderType::WalletConnect,
//!     RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")]),
//! );
//! composer.dispatch(&mut ctx, &UnsupportedMethodFallback).await?;
//!
//! assert_eq!(ctx.result(), Some(&json!("0xsignature")));
//! assert_eq!(provider.requests(), vec!["sign_personal_message(0xdead, 0xaddr)"]);
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod prompt;
mod provider;
mod recording;

pub use prompt::{ApproveAllPrompt, BrokenPrompt, DenyAllPrompt};
pub use provider::MockProvider;
pub use recording::{EventLog, RecordingMiddleware};

/// Installs a `tracing` subscriber that honours `RUST_LOG` and writes
/// through the test harness's captured output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
