//! RequestScope - cancellation for in-flight requests
//!
//! A scope is tied to the lifetime of whatever issued the requests (a
//! command, a view). Cancelling or dropping it makes every request still
//! running inside it resolve to `ErpError::Cancelled`, so late responses
//! are never applied to state that has gone away.

use shared::{ErpError, Result};
use std::future::Future;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug)]
pub struct RequestScope {
    name: String,
    cancel_tx: watch::Sender<bool>,
}

/// Cloneable handle that can cancel a scope from elsewhere (e.g. a Ctrl-C task)
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }
}

impl RequestScope {
    pub fn new(name: impl Into<String>) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self { name: name.into(), cancel_tx }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cancel(&self) {
        if !self.is_cancelled() {
            debug!(scope = %self.name, "request scope cancelled");
        }
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }

    pub fn handle(&self) -> CancelHandle {
        CancelHandle { cancel_tx: self.cancel_tx.clone() }
    }

    /// Run `fut` unless the scope is cancelled first
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let mut cancelled = self.cancel_tx.subscribe();
        if *cancelled.borrow_and_update() {
            return Err(ErpError::Cancelled);
        }
        tokio::select! {
            result = fut => result,
            _ = cancelled.wait_for(|c| *c) => Err(ErpError::Cancelled),
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel_tx.send_replace(true);
    }
}
