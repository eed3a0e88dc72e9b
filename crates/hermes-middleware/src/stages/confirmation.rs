//! User-confirmation gate.
//!
//! Pass-through decorator placed ahead of the provider router: signing and
//! transaction methods must be approved through a [`UserPrompt`] surface
//! before they may reach a backend. A denial finalizes the context, and
//! the router downstream refuses to route a finalized context, so denied
//! requests never touch a wallet.
//!
//! [`RequestOptions::silent`](hermes_core::RequestOptions) skips the gate
//! for calls the surrounding application has already confirmed.

use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, EthMethod, HermesError, HermesResult, UserPrompt};
use std::sync::Arc;

/// The message reported when the user rejects a request.
pub const REJECTED_MESSAGE: &str = "The user rejected the request.";

/// Decorator that gates approval-requiring methods behind a user prompt.
pub struct ConfirmationGate {
    prompt: Arc<dyn UserPrompt>,
}

impl ConfirmationGate {
    /// Creates a gate over the given confirmation surface.
    #[must_use]
    pub fn new(prompt: Arc<dyn UserPrompt>) -> Self {
        Self { prompt }
    }
}

impl Middleware for ConfirmationGate {
    fn name(&self) -> &'static str {
        "confirmation"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            let needs_approval = ctx
                .request_arguments()
                .known_method()
                .is_some_and(EthMethod::requires_approval);

            if !needs_approval || ctx.options().silent {
                return next.run(ctx).await;
            }

            let request = ctx.request();
            match self.prompt.confirm(&request).await {
                Ok(true) => next.run(ctx).await,
                Ok(false) => {
                    tracing::debug!(id = %ctx.id(), "request rejected by user");
                    ctx.write(Some(HermesError::provider(REJECTED_MESSAGE)), None);
                    Ok(())
                }
                // A broken confirmation surface is indistinguishable from a
                // rejection as far as the caller is concerned.
                Err(error) => {
                    ctx.abort(error, REJECTED_MESSAGE);
                    Ok(())
                }
            }
        })
    }
}
