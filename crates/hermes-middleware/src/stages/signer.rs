//! Signer interceptor.
//!
//! Terminal stage for backends exposing dedicated signing sub-operations
//! instead of (or alongside) a raw request transport - session-based
//! wallets in particular. Parameter shapes follow the JSON-RPC methods:
//! `personal_sign` carries `[data, address]`, `eth_signTypedData_v4`
//! carries `[address, data]`.

use crate::context::RequestContext;
use crate::middleware::{Middleware, Next};
use hermes_core::{BoxFuture, EthMethod, HermesResult, SigningProvider};
use serde_json::Value;
use std::sync::Arc;

/// Dispatches wallet methods to a backend's [`SigningProvider`]
/// sub-operations.
pub struct SignerInterceptor {
    provider: Arc<dyn SigningProvider>,
}

impl SignerInterceptor {
    /// Creates an interceptor over the given signing backend.
    #[must_use]
    pub fn new(provider: Arc<dyn SigningProvider>) -> Self {
        Self { provider }
    }
}

/// Extracts the string parameter at `index`, if there is one.
fn str_param(params: &[Value], index: usize) -> Option<&str> {
    params.get(index).and_then(Value::as_str)
}

impl Middleware for SignerInterceptor {
    fn name(&self) -> &'static str {
        "signer"
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            // Owned copy so the provider call does not hold a borrow of the
            // context it must finalize.
            let params = ctx.request_arguments().params.clone();

            match ctx.request_arguments().known_method() {
                Some(EthMethod::PersonalSign) => {
                    let Some((data, address)) = str_param(&params, 0).zip(str_param(&params, 1))
                    else {
                        ctx.abort(
                            anyhow::anyhow!("malformed personal_sign parameters"),
                            "Failed to sign data.",
                        );
                        return Ok(());
                    };
                    match self.provider.sign_personal_message(data, address).await {
                        Ok(result) => ctx.end(result),
                        Err(error) => ctx.abort(error, "Failed to sign data."),
                    }
                    Ok(())
                }
                Some(EthMethod::SignTypedData) => {
                    let Some((address, data)) = str_param(&params, 0).zip(str_param(&params, 1))
                    else {
                        ctx.abort(
                            anyhow::anyhow!("malformed eth_signTypedData_v4 parameters"),
                            "Failed to sign data.",
                        );
                        return Ok(());
                    };
                    match self.provider.sign_typed_data(data, address).await {
                        Ok(result) => ctx.end(result),
                        Err(error) => ctx.abort(error, "Failed to sign data."),
                    }
                    Ok(())
                }
                Some(EthMethod::SendTransaction) => {
                    let request = ctx.request();
                    match self.provider.send_raw_request(&request).await {
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
