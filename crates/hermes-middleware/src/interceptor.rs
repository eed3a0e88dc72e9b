//! Provider routing.
//!
//! The [`Interceptor`] is a composer-of-composers: a middleware whose only
//! job is to select, per request, the provider-specific chain configured
//! for the context's [`ProviderType`] and dispatch into it. The table is
//! fixed at construction; the interceptor itself holds no other state, so
//! one instance serves any number of concurrent requests.
//!
//! Two situations fall through to the interceptor's own `next` instead of
//! entering a provider chain:
//!
//! - no chain is configured for the provider type (unsupported provider is
//!   not fatal; an outer chain may apply a default policy);
//! - the context is already finalized, because an earlier decorator (for
//!   example the confirmation gate) terminated the request.

use crate::composer::Composer;
use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, HermesResult, ProviderType};
use std::collections::HashMap;

/// Middleware that routes each request into the chain configured for its
/// provider type.
///
/// # Example
///
/// ```
/// use hermes_core::ProviderType;
/// use hermes_middleware::{Composer, Interceptor, stages::DisconnectedInterceptor};
///
/// let interceptor = Interceptor::builder()
///     .route(
///         ProviderType::Disconnected,
///         Composer::new().with(DisconnectedInterceptor),
///     )
///     .build();
///
/// assert!(interceptor.is_routable(ProviderType::Disconnected));
/// assert!(!interceptor.is_routable(ProviderType::MetaMask));
/// ```
pub struct Interceptor {
    composers: HashMap<ProviderType, Composer>,
}

impl Interceptor {
    /// Creates a builder for the provider-to-chain table.
    #[must_use]
    pub fn builder() -> InterceptorBuilder {
        InterceptorBuilder::default()
    }

    /// Returns `true` if a chain is configured for the provider type.
    #[must_use]
    pub fn is_routable(&self, provider_type: ProviderType) -> bool {
        self.composers.contains_key(&provider_type)
    }
}

impl Middleware for Interceptor {
    fn name(&self) -> &'static str {
        "interceptor"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            match self.composers.get(&ctx.provider_type()) {
                Some(composer) if ctx.writeable() => {
                    tracing::debug!(
                        id = %ctx.id(),
                        provider = %ctx.provider_type(),
                        "routing into provider chain"
                    );
                    composer.dispatch(ctx, &next).await
                }
                _ => next.run(ctx).await,
            }
        })
    }
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<&'static str> =
            self.composers.keys().map(|p| p.name()).collect();
        providers.sort_unstable();
        f.debug_struct("Interceptor")
            .field("providers", &providers)
            .finish()
    }
}

/// Builder for an [`Interceptor`]'s provider-to-chain table.
#[derive(Default)]
pub struct InterceptorBuilder {
    composers: HashMap<ProviderType, Composer>,
}

impl InterceptorBuilder {
    /// Routes a provider type into a middleware chain.
    ///
    /// Routing the same provider type twice replaces the earlier chain.
    #[must_use]
    pub fn route(mut self, provider_type: ProviderType, composer: Composer) -> Self {
        self.composers.insert(provider_type, composer);
        self
    }

    /// Routes a provider type into a single-middleware chain.
    #[must_use]
    pub fn route_single<M: Middleware>(self, provider_type: ProviderType, middleware: M) -> Self {
        self.route(provider_type, Composer::new().with(middleware))
    }

    /// Builds the interceptor. The table is immutable from here on.
    #[must_use]
    pub fn build(self) -> Interceptor {
        Interceptor {
            composers: self.composers,
        }
    }
}
