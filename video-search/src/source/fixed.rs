//! Fixed sample source
//!
//! Waits for a configured delay and then answers every query with the same two
//! sample videos. Useful as an offline default and for demos.

use std::time::Duration;

use async_trait::async_trait;

use super::{ResultSource, SourceResult};
use crate::types::VideoResult;

/// Source returning [`sample_videos`] after `delay`
#[derive(Debug, Clone)]
pub struct FixedSource {
    delay: Duration,
}

impl FixedSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl ResultSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>> {
        tracing::debug!(query, delay_ms = self.delay.as_millis() as u64, "Serving sample videos");
        tokio::time::sleep(self.delay).await;
        Ok(sample_videos())
    }
}

/// The two sample videos
pub fn sample_videos() -> Vec<VideoResult> {
    vec![
        VideoResult::new(
            "Sample Video 1",
            "This is a description for sample video 1.",
            "https://images.unsplash.com/photo-1611162616475-46b635cb6868?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w1MDcxMzJ8MHwxfHNlYXJjaHwxfHx5b3V0dWJlJTIwdGh1bWJuYWlsfGVufDB8fHx8MTcxNjI3NjI4NXww&ixlib=rb-4.0.3&q=80&w=1080",
            "https://www.youtube.com/watch?v=sample1",
        ),
        VideoResult::new(
            "Sample Video 2",
            "This is a description for sample video 2.",
            "https://images.unsplash.com/32/Mc8kW4x9Q3aRR3RkP5Im_IMG_4417.jpg?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&ixid=M3w1MDcxMzJ8MHwxfHNlYXJjaHwyfHx5b3V0dWJlJTIwdGh1bWJuYWlsfGVufDB8fHx8MTcxNjI3NjI4NXww&ixlib=rb-4.0.3&q=80&w=1080",
            "https://www.youtube.com/watch?v=sample2",
        ),
    ]
}
