//! Deterministic scripted source
//!
//! Every call is recorded and stays pending until the owner resolves or fails
//! it by index. This lets tests control exactly when and in which order calls
//! complete, without wall-clock timers.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use super::{ResultSource, SourceError, SourceResult};
use crate::types::VideoResult;

type Responder = oneshot::Sender<SourceResult<Vec<VideoResult>>>;

/// A call received by a [`ScriptedSource`]
#[derive(Debug)]
pub struct ScriptedCall {
    /// Query the call was made with
    pub query: String,
    responder: Option<Responder>,
}

impl ScriptedCall {
    /// Whether the call is still waiting for an outcome
    pub fn is_pending(&self) -> bool {
        self.responder.is_some()
    }
}

#[derive(Default)]
struct Shared {
    calls: Mutex<Vec<ScriptedCall>>,
    arrived: Notify,
}

/// Source whose calls are completed by hand
///
/// Clones share the same call log, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    shared: Arc<Shared>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn calls_guard(&self) -> MutexGuard<'_, Vec<ScriptedCall>> {
        self.shared
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls_guard().len()
    }

    /// Queries of all calls received so far, in arrival order
    pub fn queries(&self) -> Vec<String> {
        self.calls_guard().iter().map(|c| c.query.clone()).collect()
    }

    /// Whether call `index` exists and has not been completed
    pub fn is_pending(&self, index: usize) -> bool {
        self.calls_guard()
            .get(index)
            .is_some_and(ScriptedCall::is_pending)
    }

    /// Wait until at least `count` calls have arrived
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let arrived = self.shared.arrived.notified();
            if self.call_count() >= count {
                return;
            }
            arrived.await;
        }
    }

    /// Complete call `index` with `results`
    ///
    /// Returns false if the call does not exist or was already completed.
    pub fn resolve(&self, index: usize, results: Vec<VideoResult>) -> bool {
        self.complete(index, Ok(results))
    }

    /// Fail call `index` with a transport fault carrying `reason`
    pub fn fail(&self, index: usize, reason: impl Into<String>) -> bool {
        self.complete(index, Err(SourceError::Other(reason.into())))
    }

    fn complete(&self, index: usize, outcome: SourceResult<Vec<VideoResult>>) -> bool {
        let responder = self
            .calls_guard()
            .get_mut(index)
            .and_then(|call| call.responder.take());

        match responder {
            // The caller may have gone away; the call still counts as completed
            Some(responder) => {
                let _ = responder.send(outcome);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ResultSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>> {
        let (tx, rx) = oneshot::channel();
        self.calls_guard().push(ScriptedCall {
            query: query.to_string(),
            responder: Some(tx),
        });
        self.shared.arrived.notify_waiters();

        rx.await
            .unwrap_or_else(|_| Err(SourceError::Other("scripted call dropped".to_string())))
    }
}
