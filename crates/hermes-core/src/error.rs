//! Error types for Hermes.
//!
//! [`HermesError`] covers the two kinds of failure the pipeline can
//! produce:
//!
//! - dispatch-contract violations (`DoubleDispatch`, `UnsupportedMethod`),
//!   which reject the whole dispatch and propagate to the caller;
//! - provider failures (`Provider`), which the owning middleware is
//!   expected to catch and convert into a finalized context error.
//!
//! An unroutable provider type is deliberately *not* an error: the router
//! falls through to its outer chain instead.

use thiserror::Error;

/// Result type alias using [`HermesError`].
pub type HermesResult<T> = Result<T, HermesError>;

/// Standard error type for Hermes.
///
/// # Example
///
/// ```
/// use hermes_core::HermesError;
///
/// let error = HermesError::unsupported_method("eth_foo");
/// assert!(error.to_string().contains("eth_foo"));
/// ```
#[derive(Error, Debug)]
pub enum HermesError {
    /// A middleware invoked its `next` continuation more than once, or
    /// invoked a stale continuation after a later stage already ran.
    ///
    /// This is a programming error in the middleware, never a runtime
    /// condition; it always rejects the whole dispatch.
    #[error("next() called multiple times (middleware index {index})")]
    DoubleDispatch {
        /// The chain index the offending continuation pointed at.
        index: usize,
    },

    /// No middleware in the chain handled the request and the terminal
    /// fallback has no handler for it either.
    #[error("no handler for method '{method}'")]
    UnsupportedMethod {
        /// The unhandled JSON-RPC method name.
        method: String,
    },

    /// The underlying wallet backend rejected or threw.
    ///
    /// Carries a human-readable message; the original backend error, when
    /// there is one, is preserved as the source.
    #[error("{message}")]
    Provider {
        /// Human-readable description of the failure.
        message: String,
        /// The backend's own error, if any.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl HermesError {
    /// Creates a double-dispatch error for the given chain index.
    #[must_use]
    pub const fn double_dispatch(index: usize) -> Self {
        Self::DoubleDispatch { index }
    }

    /// Creates an unsupported-method error.
    #[must_use]
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Creates a provider error with a message.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a provider error wrapping a backend error.
    pub fn provider_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns `true` for dispatch-contract violations that must propagate
    /// to the dispatch caller rather than be written into a context.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::DoubleDispatch { .. })
    }
}
