//! # Hermes Core
//!
//! Core types and capability traits for the Hermes wallet middleware
//! pipeline.
//!
//! This crate provides the foundational types used throughout Hermes:
//!
//! - [`RequestArguments`] / [`JsonRpcRequest`] / [`JsonRpcResponse`] - JSON-RPC 2.0 wire shapes
//! - [`RequestId`] - process-unique, monotonically increasing request identifier
//! - [`EthMethod`] - the wallet methods the built-in interceptors understand
//! - [`ProviderType`] - which wallet backend a request targets
//! - [`Provider`] / [`SigningProvider`] / [`UserPrompt`] - opaque backend capabilities
//! - [`HermesError`] - standard error types

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod options;
mod provider;
mod request;
mod response;

pub use error::{HermesError, HermesResult};
pub use options::{RequestOptions, SendOverrides};
pub use provider::{BoxFuture, Provider, ProviderType, SigningProvider, UserPrompt};
pub use request::{EthMethod, JsonRpcRequest, RequestArguments, RequestId, JSONRPC_VERSION};
pub use response::{EncodedError, JsonRpcResponse};
