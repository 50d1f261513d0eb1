//! Result source implementations
//!
//! This module provides a trait-based abstraction over whatever answers a
//! query. The controller only ever sees [`ResultSource`].
//!
//! - [`FixedSource`]: two sample videos after a fixed delay
//! - [`SearxngSource`]: a self-hosted SearXNG instance
//! - [`ScriptedSource`]: deterministic fake driven by tests
//! - [`TimeoutSource`]: wraps another source with a per-call deadline

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, ConfigError, SourceKind};
use crate::state::ErrorKind;
use crate::types::VideoResult;

pub mod fixed;
pub mod scripted;
pub mod searxng;
pub mod timeout;

pub use fixed::FixedSource;
pub use scripted::{ScriptedCall, ScriptedSource};
pub use searxng::SearxngSource;
pub use timeout::TimeoutSource;

/// Transport or backend faults raised by a source
///
/// "No matches" is never an error; sources return an empty list for that.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP request could not be sent or its body not decoded
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend error {status}: {body}")]
    Status { status: u16, body: String },

    /// The call exceeded its deadline
    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    /// Any other failure reported by the source
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    /// Classify for the controller. Every source fault is a transport failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::TransportFailure
    }
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Trait for result sources
///
/// Implementations may take arbitrarily long and may complete out of order
/// relative to other outstanding calls.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Search for videos matching `query`, in relevance order
    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>>;
}

#[async_trait]
impl<S: ResultSource + ?Sized> ResultSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>> {
        (**self).search(query).await
    }
}

/// Build the source selected by `config`, wrapped in a timeout when configured
pub fn build_source(config: &Config) -> Result<Arc<dyn ResultSource>, ConfigError> {
    let source: Arc<dyn ResultSource> = match config.search.source {
        SourceKind::Fixed => Arc::new(FixedSource::new(config.fixed.delay())),
        SourceKind::Searxng => Arc::new(SearxngSource::new(
            config.searxng.clone(),
            config.search.max_results,
        )?),
    };

    tracing::info!("Using '{}' result source", source.name());

    Ok(match config.search.timeout() {
        Some(limit) => Arc::new(TimeoutSource::new(source, limit)),
        None => source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_classify_as_transport() {
        let errors = [
            SourceError::Status {
                status: 502,
                body: "bad gateway".into(),
            },
            SourceError::Timeout(Duration::from_secs(1)),
            SourceError::Other("boom".into()),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::TransportFailure);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = SourceError::Status {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(err.to_string(), "backend error 500: oops");
    }

    #[test]
    fn test_build_default_source() {
        let source = build_source(&Config::default()).unwrap();
        assert_eq!(source.name(), "fixed");
    }

    #[test]
    fn test_build_with_timeout() {
        let mut config = Config::default();
        config.search.timeout_seconds = Some(3);
        let source = build_source(&config).unwrap();
        assert_eq!(source.name(), "fixed");
    }

    #[test]
    fn test_build_searxng_rejects_bad_url() {
        let mut config = Config::default();
        config.search.source = SourceKind::Searxng;
        config.searxng.url = "not a url".into();
        let err = build_source(&config).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
