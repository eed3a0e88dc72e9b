//! Request logging middleware.
//!
//! Pure pass-through stage that wraps the downstream chain in structured
//! `tracing` events: one before delegation with the request's shape, one
//! after with the outcome and elapsed time. It never touches the context's
//! state beyond reading it.

use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, HermesResult};
use std::time::Instant;

/// Middleware that logs each request around the downstream chain.
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    /// Logical name of the dispatching surface, attached to every event.
    service: &'static str,
}

impl LoggingMiddleware {
    /// Creates a logging middleware tagged with the given service name.
    #[must_use]
    pub const fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new("hermes")
    }
}

impl Middleware for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            let started = Instant::now();
            tracing::debug!(
                service = self.service,
                id = %ctx.id(),
                provider = %ctx.provider_type(),
                method = %ctx.request_arguments().method,
                "request dispatched"
            );

            let outcome = next.run(ctx).await;
            let elapsed = started.elapsed();

            match &outcome {
                Ok(()) if ctx.writeable() => tracing::debug!(
                    service = self.service,
                    id = %ctx.id(),
                    ?elapsed,
                    "request fell through unhandled"
                ),
                Ok(()) => match ctx.error() {
                    Some(error) => tracing::warn!(
                        service = self.service,
                        id = %ctx.id(),
                        ?elapsed,
                        %error,
                        "request failed"
                    ),
                    None => tracing::debug!(
                        service = self.service,
                        id = %ctx.id(),
                        ?elapsed,
                        "request completed"
                    ),
                },
                Err(error) => tracing::warn!(
                    service = self.service,
                    id = %ctx.id(),
                    ?elapsed,
                    %error,
                    "dispatch rejected"
                ),
            }

            outcome
        })
    }
}
