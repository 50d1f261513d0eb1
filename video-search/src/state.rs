//! Search lifecycle state
//!
//! [`SearchState`] is the single value the controller owns. Every transition
//! replaces it wholesale; the token carried by the non-idle variants ties the
//! state to the submission that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::VideoResult;

// ============================================================================
// Request Token
// ============================================================================

/// Identifier minted by every `submit()`
///
/// Tokens only ever increase within one controller, so comparing against the
/// latest minted token is enough to detect a stale response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Error Classification
// ============================================================================

/// Classified error kinds surfaced by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The result source failed or faulted; the user can try again
    TransportFailure,
    /// A response arrived for a superseded submission and was ignored.
    /// Never stored in [`SearchState`].
    StaleResponseDiscarded,
}

impl ErrorKind {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::TransportFailure => "Search failed, try again",
            ErrorKind::StaleResponseDiscarded => "Response discarded",
        }
    }
}

/// Failure stored in [`SearchState::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub kind: ErrorKind,
    /// Human-readable cause from the source
    pub reason: String,
}

impl SearchFailure {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TransportFailure,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Search State
// ============================================================================

/// Lifecycle state of the search component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting on the source for `token`
    Loading { token: RequestToken },
    /// Results for `token`, in source order. May be empty.
    Success {
        token: RequestToken,
        results: Vec<VideoResult>,
    },
    /// The source failed for `token`
    Error {
        token: RequestToken,
        failure: SearchFailure,
    },
}

impl SearchState {
    /// Token of the submission this state belongs to (`None` when idle)
    pub fn token(&self) -> Option<RequestToken> {
        match self {
            SearchState::Idle => None,
            SearchState::Loading { token }
            | SearchState::Success { token, .. }
            | SearchState::Error { token, .. } => Some(*token),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Results when in the success state
    pub fn results(&self) -> Option<&[VideoResult]> {
        match self {
            SearchState::Success { results, .. } => Some(results),
            _ => None,
        }
    }

    /// Failure when in the error state
    pub fn failure(&self) -> Option<&SearchFailure> {
        match self {
            SearchState::Error { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading { .. } => "loading",
            SearchState::Success { .. } => "success",
            SearchState::Error { .. } => "error",
        }
    }
}
