//! # Hermes Middleware
//!
//! Request-interception middleware pipeline for wallet/RPC requests.
//!
//! Outgoing wallet calls (sign message, send transaction, ...) are routed
//! through an ordered chain of handlers before they reach an underlying
//! wallet backend:
//!
//! ```text
//! caller ── RequestContext ─→ Composer ─→ [gate] ─→ [router] ─→ provider chain
//!                │                                                   │
//!                └────────────── result / error / response ←── write ┘
//! ```
//!
//! - [`RequestContext`] - mutable per-request record, finalized exactly once
//! - [`Middleware`] / [`Next`] - a chain link and its continuation
//! - [`Composer`] - continuation-passing dispatch over an ordered chain
//! - [`Interceptor`] - provider-keyed composer-of-composers
//! - [`stages`] - the built-in chain links
//!
//! ## Example
//!
//! ```
//! use hermes_core::{ProviderType, RequestArguments};
//! use hermes_middleware::{
//!     Composer, Interceptor, RequestContext, UnsupportedMethodFallback,
//!     stages::DisconnectedInterceptor,
//! };
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Interceptor::builder()
//!     .route_single(ProviderType::Disconnected, DisconnectedInterceptor)
//!     .build();
//! let pipeline = Composer::new().with(router);
//!
//! let mut ctx = RequestContext::new(
//!     ProviderType::Disconnected,
//!     RequestArguments::new("personal_sign", vec![json!("0xdead"), json!("0xaddr")]),
//! );
//! pipeline.dispatch(&mut ctx, &UnsupportedMethodFallback).await?;
//!
//! assert!(!ctx.writeable());
//! assert!(ctx.error().is_some());
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod composer;
pub mod context;
pub mod interceptor;
pub mod middleware;
pub mod stages;

pub use composer::{Composer, NoopFallback, UnsupportedMethodFallback};
pub use context::{RequestContext, ResponseCallback, DEFAULT_FALLBACK_MESSAGE};
pub use interceptor::{Interceptor, InterceptorBuilder};
pub use middleware::{BoxedMiddleware, FnMiddleware, Middleware, Next, Terminal};
