//! Video Search Library
//!
//! Topic-driven video search with a "latest submission wins" result
//! lifecycle. A [`SearchController`] owns the query text and the
//! [`SearchState`]; a [`ResultSource`] answers queries.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use video_search::{FixedSource, SearchController};
//!
//! let mut controller = SearchController::new(Arc::new(FixedSource::default()));
//! let mut changes = controller.subscribe();
//!
//! controller.set_query_text("rust");
//! controller.submit();
//! let state = controller.settle_latest().await;
//! ```
//!
//! # Configuration
//! Set `VIDEO_SEARCH_SOURCE` / `SEARXNG_URL` env vars or configure in
//! `~/.video-search/config.toml`

pub mod cli;
pub mod config;
pub mod controller;
pub mod events;
pub mod output;
pub mod source;
pub mod state;
pub mod types;

// Re-export the main types
pub use config::{Config, ConfigError, SourceKind};
pub use controller::{SearchController, Settled};
pub use events::StateReceiver;
pub use source::{
    build_source, FixedSource, ResultSource, ScriptedSource, SearxngSource, SourceError,
    SourceResult, TimeoutSource,
};
pub use state::{ErrorKind, RequestToken, SearchFailure, SearchState};
pub use types::VideoResult;
