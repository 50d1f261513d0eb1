//! Search controller
//!
//! Mediates between the user (edit the query, submit it) and a
//! [`ResultSource`]. The displayed state always reflects the most recent
//! submission: every submit mints a fresh [`RequestToken`], and an outcome is
//! applied only if its token is still the latest one when it arrives. Older
//! calls are left to run; their outcomes are discarded.
//!
//! All state lives in the controller and is mutated through `&mut self`, so
//! whoever owns it is the single logical thread that applies transitions.
//! Source calls run as background tasks; [`SearchController::settle`] brings
//! their outcomes back onto that thread.
//!
//! ```rust,ignore
//! let mut controller = SearchController::new(source);
//! let mut changes = controller.subscribe();
//!
//! controller.set_query_text("cats");
//! controller.submit();
//! controller.settle_latest().await;
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::JoinSet;

use crate::events::{StateReceiver, Subscribers};
use crate::source::{ResultSource, SourceError, SourceResult};
use crate::state::{ErrorKind, RequestToken, SearchFailure, SearchState};
use crate::types::VideoResult;

/// Outcome of one source call, tagged with the submission it belongs to
struct Completion {
    token: RequestToken,
    outcome: SourceResult<Vec<VideoResult>>,
}

/// What [`SearchController::settle`] did with a completed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The outcome belonged to the latest submission and is now the state
    Applied(RequestToken),
    /// The outcome belonged to a superseded submission and was dropped
    Discarded(RequestToken),
}

impl Settled {
    pub fn token(&self) -> RequestToken {
        match self {
            Settled::Applied(token) | Settled::Discarded(token) => *token,
        }
    }
}

/// Owner of the query text, the lifecycle state and the in-flight calls
///
/// Dropping the controller aborts every in-flight call; their outcomes are
/// never applied.
pub struct SearchController {
    source: Arc<dyn ResultSource>,
    query_text: String,
    state: SearchState,
    latest: Option<RequestToken>,
    in_flight: JoinSet<Completion>,
    subscribers: Subscribers,
}

impl SearchController {
    /// Create an idle controller with an empty query
    pub fn new(source: Arc<dyn ResultSource>) -> Self {
        Self {
            source,
            query_text: String::new(),
            state: SearchState::Idle,
            latest: None,
            in_flight: JoinSet::new(),
            subscribers: Subscribers::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Most recently minted token (`None` before the first submit)
    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest
    }

    /// Number of source calls that have not been settled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    // ========================================================================
    // Inbound operations
    // ========================================================================

    /// Replace the pending query text. Does not touch the state.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Receive every subsequent state transition
    pub fn subscribe(&mut self) -> StateReceiver {
        self.subscribers.subscribe()
    }

    /// Submit the current query text
    ///
    /// Enters `Loading` for a freshly minted token and starts the source call
    /// in the background, returning without waiting for it. Empty queries are
    /// forwarded as-is.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since the source call is
    /// spawned onto the current runtime.
    pub fn submit(&mut self) -> RequestToken {
        let token = self
            .latest
            .map_or_else(RequestToken::first, RequestToken::next);
        self.latest = Some(token);

        self.transition(SearchState::Loading { token });

        let query = self.query_text.clone();
        let source = Arc::clone(&self.source);

        tracing::info!(%token, query = %query, source = source.name(), "Submitting search");

        self.in_flight.spawn(async move {
            let outcome = AssertUnwindSafe(source.search(&query))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(SourceError::Other(panic_reason(panic))));
            Completion { token, outcome }
        });

        token
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Wait for the next source call to finish and apply its outcome
    ///
    /// Returns `None` when no call is in flight.
    pub async fn settle(&mut self) -> Option<Settled> {
        loop {
            match self.in_flight.join_next().await? {
                Ok(completion) => return Some(self.apply(completion)),
                Err(err) => {
                    tracing::warn!("Search task ended without an outcome: {}", err);
                }
            }
        }
    }

    /// Settle calls until the latest submission has been applied (or nothing
    /// is left in flight), then return the current state
    pub async fn settle_latest(&mut self) -> &SearchState {
        while self.state.is_loading() {
            if self.settle().await.is_none() {
                break;
            }
        }
        &self.state
    }

    fn apply(&mut self, completion: Completion) -> Settled {
        let Completion { token, outcome } = completion;

        if self.latest != Some(token) {
            tracing::debug!(
                %token,
                latest = ?self.latest,
                kind = ?ErrorKind::StaleResponseDiscarded,
                "Discarding stale response"
            );
            return Settled::Discarded(token);
        }

        let next = match outcome {
            Ok(results) => {
                tracing::info!(%token, count = results.len(), "Search succeeded");
                SearchState::Success { token, results }
            }
            Err(err) => {
                tracing::warn!(%token, "Search failed: {}", err);
                SearchState::Error {
                    token,
                    failure: SearchFailure {
                        kind: err.kind(),
                        reason: err.to_string(),
                    },
                }
            }
        };

        self.transition(next);
        Settled::Applied(token)
    }

    /// Commit `next`, then announce it
    fn transition(&mut self, next: SearchState) {
        tracing::debug!(from = self.state.label(), to = next.label(), "State transition");
        self.state = next;
        self.subscribers.announce(&self.state);
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::debug!(
                in_flight = self.in_flight.len(),
                "Controller disposed, aborting in-flight searches"
            );
        }
    }
}

fn panic_reason(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("source panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("source panicked: {}", msg)
    } else {
        "source panicked".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
