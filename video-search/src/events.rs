//! State change notifications
//!
//! Subscribers receive every committed [`SearchState`] transition exactly
//! once, in order, over an unbounded channel.

use tokio::sync::mpsc;

use crate::state::SearchState;

/// Sender half held by the controller
pub type StateSender = mpsc::UnboundedSender<SearchState>;

/// Receiver half handed to subscribers
pub type StateReceiver = mpsc::UnboundedReceiver<SearchState>;

/// Create a new state channel
pub fn state_channel() -> (StateSender, StateReceiver) {
    mpsc::unbounded_channel()
}

/// Fan-out of state changes to every live subscriber
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<StateSender>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> StateReceiver {
        let (tx, rx) = state_channel();
        self.senders.push(tx);
        rx
    }

    /// Announce `state` to every subscriber, pruning those that went away
    pub fn announce(&mut self, state: &SearchState) {
        self.senders.retain(|tx| tx.send(state.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
