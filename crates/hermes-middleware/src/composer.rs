//! Middleware composition.
//!
//! A [`Composer`] turns an ordered middleware list into one dispatch
//! operation with linked-continuation semantics: each middleware receives a
//! `next` that invokes the following one, and advancing past the end of the
//! list invokes the externally supplied [`Terminal`] fallback.
//!
//! The list is append-only during setup and immutable during dispatch.
//! Dispatch is a single linear traversal - no backtracking, no re-entrant
//! scheduling - guarded by a per-dispatch cursor so that a middleware
//! calling its continuation twice fails fast instead of re-running the
//! remainder of the chain.

use crate::context::RequestContext;
use crate::middleware::{BoxedMiddleware, Middleware, Next, Terminal};
use hermes_core::{BoxFuture, HermesError, HermesResult};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

/// An ordered middleware chain with one dispatch operation.
///
/// # Example
///
/// ```
/// use hermes_middleware::{Composer, stages::LoggingMiddleware};
///
/// let composer = Composer::new().with(LoggingMiddleware::new("wallet"));
/// assert_eq!(composer.stage_names(), vec!["logging"]);
/// ```
#[derive(Default)]
pub struct Composer {
    middlewares: Vec<BoxedMiddleware>,
}

impl Composer {
    /// Creates an empty composer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composer from an already-built middleware list.
    #[must_use]
    pub fn from_stages(middlewares: Vec<BoxedMiddleware>) -> Self {
        Self { middlewares }
    }

    /// Appends a middleware to the end of the chain.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.middlewares.push(Arc::new(middleware));
    }

    /// Appends a middleware, builder style.
    #[must_use]
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.push(middleware);
        self
    }

    /// Returns the number of middlewares in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Returns `true` if the chain holds no middleware.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Returns the names of the chain's middlewares, in dispatch order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    /// Dispatches one request through the chain.
    ///
    /// Resolves once the entire chain - including any nested asynchronous
    /// work - has settled. The context may or may not be finalized
    /// afterwards: a chain whose stages all passed through leaves that
    /// decision to `terminal`.
    ///
    /// # Errors
    ///
    /// Rejects with whatever a middleware or the terminal returned
    /// uncaught; [`HermesError::DoubleDispatch`] for continuation misuse.
    pub async fn dispatch(
        &self,
        ctx: &mut RequestContext,
        terminal: &dyn Terminal,
    ) -> HermesResult<()> {
        tracing::debug!(
            id = %ctx.id(),
            provider = %ctx.provider_type(),
            method = %ctx.request_arguments().method,
            stages = self.middlewares.len(),
            "dispatching request"
        );
        let cursor = AtomicUsize::new(0);
        Next::entry(&self.middlewares, &cursor, terminal)
            .run(ctx)
            .await
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Terminal fallback that rejects the dispatch with
/// [`HermesError::UnsupportedMethod`].
///
/// The usual chain end for a top-level dispatch: reaching it means no
/// middleware anywhere was willing to handle the method. The context is
/// left untouched (still writeable); the rejection travels to the dispatch
/// caller instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedMethodFallback;

impl Terminal for UnsupportedMethodFallback {
    fn call<'a>(&'a self, ctx: &'a mut RequestContext) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            Err(HermesError::unsupported_method(
                ctx.request_arguments().method.as_str(),
            ))
        })
    }
}

/// Terminal fallback that accepts the fall-through and leaves the context
/// writeable.
///
/// Useful when an outer collaborator applies its own default policy after
/// dispatch returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFallback;

impl Terminal for NoopFallback {
    fn call<'a>(&'a self, _ctx: &'a mut RequestContext) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
