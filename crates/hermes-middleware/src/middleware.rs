//! Core middleware trait and the `next` continuation.
//!
//! A [`Middleware`] receives the mutable [`RequestContext`] and a [`Next`]
//! continuation. It either handles the request itself (writes the context
//! and returns without calling `next`) or delegates to the remainder of the
//! chain, optionally wrapping work around the delegation.
//!
//! # Invariants
//!
//! - `next.run()` may be called at most once; a second call - or a call to
//!   a stale continuation after a later stage already ran - fails the whole
//!   dispatch with [`HermesError::DoubleDispatch`].
//! - A middleware that wants to turn a provider failure into a terminal
//!   response must catch it locally and call
//!   [`RequestContext::abort`](crate::RequestContext::abort); anything it
//!   lets escape propagates to the dispatch caller.
//!
//! # Example
//!
//! ```
//! use hermes_core::{BoxFuture, HermesResult};
//! use hermes_middleware::{Middleware, Next, RequestContext};
//!
//! struct Probe;
//!
//! impl Middleware for Probe {
//!     fn name(&self) -> &'static str {
//!         "probe"
//!     }
//!
//!     fn dispatch<'a>(
//!         &'a self,
//!         ctx: &'a mut RequestContext,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, HermesResult<()>> {
//!         Box::pin(async move {
//!             tracing::debug!(method = %ctx.request_arguments().method, "inspecting");
//!             next.run(ctx).await
//!         })
//!     }
//! }
//! ```

use crate::context::RequestContext;
use hermes_core::{BoxFuture, HermesError, HermesResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A type-erased middleware that can be stored in a chain.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A chain link that can terminate a request or delegate to the next link.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this middleware, used for logging.
    fn name(&self) -> &'static str;

    /// Processes the request.
    ///
    /// Terminal behavior: write the context and return without touching
    /// `next`. Pass-through behavior: call `next.run(ctx)` exactly once and
    /// return its result (work may surround the call).
    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>>;
}

/// The chain's ultimate fallback, invoked when dispatch advances past the
/// last middleware.
///
/// A [`Next`] is itself a `Terminal`, which is how a nested composer's
/// chain falls through to the outer chain that invoked it.
pub trait Terminal: Send + Sync {
    /// Handles a request no middleware in the chain terminated.
    fn call<'a>(&'a self, ctx: &'a mut RequestContext) -> BoxFuture<'a, HermesResult<()>>;
}

/// Continuation handed to each middleware; invokes the remainder of the
/// chain.
///
/// All continuations of one dispatch share a cursor holding the highest
/// chain index reached so far. Running a continuation at or below the
/// cursor is the double-dispatch contract violation and fails fast instead
/// of re-executing downstream stages.
pub struct Next<'a> {
    /// The full middleware list of the owning composer.
    chain: &'a [BoxedMiddleware],

    /// One past the highest index reached in this dispatch.
    cursor: &'a AtomicUsize,

    /// Invoked when `index` runs past the end of `chain`.
    terminal: &'a dyn Terminal,

    /// The chain position this continuation advances to.
    index: usize,
}

impl<'a> Next<'a> {
    /// Creates the entry continuation for one dispatch.
    pub(crate) fn entry(
        chain: &'a [BoxedMiddleware],
        cursor: &'a AtomicUsize,
        terminal: &'a dyn Terminal,
    ) -> Self {
        Self {
            chain,
            cursor,
            terminal,
            index: 0,
        }
    }

    /// Invokes the next middleware in the chain, or the terminal fallback
    /// past the end of it.
    ///
    /// # Errors
    ///
    /// [`HermesError::DoubleDispatch`] when this continuation (or a later
    /// one) has already run; otherwise whatever the downstream chain
    /// returns.
    pub fn run<'b>(&'b self, ctx: &'b mut RequestContext) -> BoxFuture<'b, HermesResult<()>> {
        Box::pin(async move {
            if self.index < self.cursor.load(Ordering::SeqCst) {
                return Err(HermesError::double_dispatch(self.index));
            }
            self.cursor.store(self.index + 1, Ordering::SeqCst);

            if let Some(middleware) = self.chain.get(self.index) {
                tracing::trace!(
                    stage = middleware.name(),
                    index = self.index,
                    id = %ctx.id(),
                    "dispatching middleware"
                );
                let next = Next {
                    chain: self.chain,
                    cursor: self.cursor,
                    terminal: self.terminal,
                    index: self.index + 1,
                };
                middleware.dispatch(ctx, next).await
            } else {
                self.terminal.call(ctx).await
            }
        })
    }
}

impl Terminal for Next<'_> {
    fn call<'a>(&'a self, ctx: &'a mut RequestContext) -> BoxFuture<'a, HermesResult<()>> {
        self.run(ctx)
    }
}

/// A middleware created from a function, for simple stages that do not
/// warrant a named type.
///
/// # Example
///
/// ```
/// use hermes_core::{BoxFuture, HermesResult};
/// use hermes_middleware::{FnMiddleware, Next, RequestContext};
///
/// fn passthrough<'a>(
///     ctx: &'a mut RequestContext,
///     next: Next<'a>,
/// ) -> BoxFuture<'a, HermesResult<()>> {
///     Box::pin(async move { next.run(ctx).await })
/// }
///
/// let stage = FnMiddleware::new("passthrough", passthrough);
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a function-based middleware with the given name.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut RequestContext, Next<'a>) -> BoxFuture<'a, HermesResult<()>>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        (self.func)(ctx, next)
    }
}
