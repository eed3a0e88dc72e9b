//! Canned confirmation surfaces.

use hermes_core::{BoxFuture, JsonRpcRequest, UserPrompt};

/// A confirmation surface that approves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproveAllPrompt;

impl UserPrompt for ApproveAllPrompt {
    fn confirm<'a>(&'a self, _request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<bool>> {
        Box::pin(async { Ok(true) })
    }
}

/// A confirmation surface that rejects every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllPrompt;

impl UserPrompt for DenyAllPrompt {
    fn confirm<'a>(&'a self, _request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<bool>> {
        Box::pin(async { Ok(false) })
    }
}

/// A confirmation surface whose prompt itself fails.
#[derive(Debug, Clone, Default)]
pub struct BrokenPrompt {
    message: String,
}

impl BrokenPrompt {
    /// Creates a prompt that fails with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl UserPrompt for BrokenPrompt {
    fn confirm<'a>(&'a self, _request: &'a JsonRpcRequest) -> BoxFuture<'a, anyhow::Result<bool>> {
        Box::pin(async move { Err(anyhow::anyhow!("{}", self.message)) })
    }
}
