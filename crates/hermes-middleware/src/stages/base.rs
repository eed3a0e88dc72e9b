//! Base provider interceptor.
//!
//! The simplest terminal stage: wallet methods are forwarded wholesale to
//! the backend's raw `request` capability, everything else passes through.
//! Fits backends whose own transport already understands the full JSON-RPC
//! surface (injected providers, SDK providers).

use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, EthMethod, HermesResult, Provider};
use std::sync::Arc;

/// Forwards signing and transaction methods to an opaque [`Provider`].
///
/// A backend failure never escapes this stage: it is caught and converted
/// into a finalized context error.
pub struct BaseInterceptor {
    provider: Arc<dyn Provider>,
}

impl BaseInterceptor {
    /// Creates an interceptor over the given backend.
    #[must_use]
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }
}

impl Middleware for BaseInterceptor {
    fn name(&self) -> &'static str {
        "base"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            match ctx.request_arguments().known_method() {
                Some(
                    EthMethod::PersonalSign
                    | EthMethod::SignTypedData
                    | EthMethod::SendTransaction,
                ) => {
                    let request = ctx.request();
                    match self.provider.request(&request).await {
                        Ok(result) => ctx.end(result),
                        Err(error) => ctx.abort(error, "Failed to send transaction."),
                    }
                    Ok(())
                }
                _ => next.run(ctx).await,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{Composer, UnsupportedMethodFallback};
    use hermes_core::{HermesError, ProviderType, RequestArguments};
    use hermes_test::MockProvider;
    use serde_json::json;

    fn ctx(method: &str) -> RequestContext {
        RequestContext::new(
            ProviderType::Injected,
            RequestArguments::new(method, vec![json!("0xdead"), json!("0xaddr")]),
        )
    }

    #[tokio::test]
    async fn forwards_wallet_methods_to_the_provider() {
        let provider = Arc::new(MockProvider::returning(json!("0xsignature")));
        let composer = Composer::new().with(BaseInterceptor::new(provider.clone()));

        let mut ctx = ctx("personal_sign");
        composer
            .dispatch(&mut ctx, &UnsupportedMethodFallback)
            .await
            .unwrap();

        assert_eq!(ctx.result(), Some(&json!("0xsignature")));
        assert_eq!(provider.requests(), vec!["personal_sign".to_string()]);
    }

    #[tokio::test]
    async fn provider_failure_becomes_a_context_abort() {
        let provider = Arc::new(MockProvider::failing("wallet locked"));
        let composer = Composer::new().with(BaseInterceptor::new(provider));

        let mut ctx = ctx("eth_sendTransaction");
        composer
            .dispatch(&mut ctx, &UnsupportedMethodFallback)
            .await
            .unwrap();

        assert!(!ctx.writeable());
        assert_eq!(ctx.error().unwrap().to_string(), "wallet locked");
    }

    #[tokio::test]
    async fn unknown_methods_pass_through() {
        let provider = Arc::new(MockProvider::returning(json!(null)));
        let composer = Composer::new().with(BaseInterceptor::new(provider.clone()));

        let mut ctx = ctx("eth_foo");
        let error = composer
            .dispatch(&mut ctx, &UnsupportedMethodFallback)
            .await
            .unwrap_err();

        assert!(matches!(error, HermesError::UnsupportedMethod { .. }));
        assert!(provider.requests().is_empty());
        assert!(ctx.writeable());
    }
}
