//! Chain-order instrumentation.

use hermes_core::{BoxFuture, HermesResult};
use hermes_middleware::{Middleware, Next, RequestContext};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A shared, ordered log of events recorded during a dispatch.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().expect("event log poisoned").push(event.into());
    }

    /// Returns the events recorded so far, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.events.lock().expect("event log poisoned").clone()
    }
}

/// A middleware that records when it runs, for asserting chain order.
///
/// Records `"<label>-before"` on entry and `"<label>-after"` once the
/// downstream chain returns. The terminal variant finalizes the context
/// instead of delegating, recording `"<label>-end"`.
pub struct RecordingMiddleware {
    label: &'static str,
    log: EventLog,
    terminal: Option<Value>,
}

impl RecordingMiddleware {
    /// A pass-through recorder that wraps the downstream chain.
    #[must_use]
    pub fn passthrough(label: &'static str, log: &EventLog) -> Self {
        Self {
            label,
            log: log.clone(),
            terminal: None,
        }
    }

    /// A terminal recorder that ends the context with the given result.
    #[must_use]
    pub fn terminal(label: &'static str, log: &EventLog, result: Value) -> Self {
        Self {
            label,
            log: log.clone(),
            terminal: Some(result),
        }
    }
}

impl Middleware for RecordingMiddleware {
    fn name(&self) -> &'static str {
        self.label
    }

    fn dispatch<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> BoxFuture<'a, HermesResult<()>> {
        Box::pin(async move {
            if let Some(result) = &self.terminal {
                self.log.record(format!("{}-end", self.label));
                ctx.end(result.clone());
                return Ok(());
            }

            self.log.record(format!("{}-before", self.label));
            let outcome = next.run(ctx).await;
            self.log.record(format!("{}-after", self.label));
            outcome
        })
    }
}
