//! Per-call deadline for any source

use std::time::Duration;

use async_trait::async_trait;

use super::{ResultSource, SourceError, SourceResult};
use crate::types::VideoResult;

/// Wraps a source so that calls slower than `limit` fail with
/// [`SourceError::Timeout`]
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

impl<S: ResultSource> TimeoutSource<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<S: ResultSource> ResultSource for TimeoutSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>> {
        match tokio::time::timeout(self.limit, self.inner.search(query)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(source = self.inner.name(), query, "Search timed out after {:?}", self.limit);
                Err(SourceError::Timeout(self.limit))
            }
        }
    }
}
