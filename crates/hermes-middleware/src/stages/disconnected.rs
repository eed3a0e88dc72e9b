//! No-wallet interceptor.
//!
//! The chain routed for [`ProviderType::Disconnected`]: every wallet
//! method terminates here with a "no wallet" failure, because there is no
//! backend to forward to. Methods the pipeline does not recognize still
//! pass through, leaving the decision to the outer chain.
//!
//! [`ProviderType::Disconnected`]: hermes_core::ProviderType::Disconnected

use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, HermesError, HermesResult};

/// Terminal stage for the no-wallet state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisconnectedInterceptor;

impl Middleware for DisconnectedInterceptor {
    fn name(&self) -> &'static str {
        "disconnected"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            if ctx.request_arguments().known_method().is_some() {
                ctx.write(Some(HermesError::provider("No wallet connected.")), None);
                Ok(())
            } else {
                next.run(ctx).await
            }
        })
    }
}
