//! Built-in middleware stages.
//!
//! Each stage is one chain link with a single job:
//!
//! - [`BaseInterceptor`] - forward wallet methods wholesale to a backend's
//!   raw `request` capability
//! - [`SignerInterceptor`] - dispatch wallet methods to a backend's richer
//!   signing sub-operations
//! - [`DisconnectedInterceptor`] - terminal chain for the no-wallet state
//! - [`ConfirmationGate`] - user-approval decorator for signing and
//!   transaction methods
//! - [`LoggingMiddleware`] - structured per-request logging around the
//!   downstream chain

pub mod base;
pub mod confirmation;
pub mod disconnected;
pub mod logging;
pub mod signer;

pub use base::BaseInterceptor;
pub use confirmation::ConfirmationGate;
pub use disconnected::DisconnectedInterceptor;
pub use logging::LoggingMiddleware;
pub use signer::SignerInterceptor;
