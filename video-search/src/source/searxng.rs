//! SearXNG source
//!
//! Implements the ResultSource trait using a self-hosted SearXNG instance,
//! restricted to the `videos` category.
//! See: https://docs.searxng.org/dev/search_api.html

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{ResultSource, SourceError, SourceResult};
use crate::config::{ConfigError, SearXNGConfig};
use crate::types::VideoResult;

/// SearXNG source
pub struct SearxngSource {
    client: Client,
    endpoint: Url,
    engines: String,
    max_results: usize,
}

impl SearxngSource {
    pub fn new(config: SearXNGConfig, max_results: usize) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent("video-search/0.1")
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            endpoint: search_endpoint(&config.url)?,
            engines: config.engines,
            max_results,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `<base>/search`, keeping any path prefix the instance is mounted under
fn search_endpoint(base: &str) -> Result<Url, ConfigError> {
    let invalid = |source| ConfigError::InvalidUrl {
        url: base.to_string(),
        source,
    };

    let mut base_url = Url::parse(base).map_err(invalid)?;
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url.join("search").map_err(invalid)
}

// SearXNG API response types
#[derive(Debug, Deserialize)]
struct SearXNGResponse {
    results: Vec<SearXNGResult>,
}

#[derive(Debug, Deserialize)]
struct SearXNGResult {
    title: String,
    url: String,
    content: Option<String>,
    thumbnail: Option<String>,
    thumbnail_src: Option<String>,
    img_src: Option<String>,
}

impl SearXNGResult {
    fn into_video(self) -> VideoResult {
        let thumbnail_url = [self.thumbnail, self.thumbnail_src, self.img_src]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default();

        VideoResult {
            title: self.title,
            description: self.content.unwrap_or_default(),
            thumbnail_url,
            target_url: self.url,
        }
    }
}

fn into_videos(response: SearXNGResponse, limit: usize) -> Vec<VideoResult> {
    response
        .results
        .into_iter()
        .take(limit)
        .map(SearXNGResult::into_video)
        .collect()
}

#[async_trait]
impl ResultSource for SearxngSource {
    fn name(&self) -> &str {
        "searxng"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<VideoResult>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("categories", "videos".to_string()),
            ("pageno", "1".to_string()),
        ];

        if !self.engines.is_empty() {
            params.push(("engines", self.engines.clone()));
        }

        tracing::debug!(endpoint = %self.endpoint, query, "Querying SearXNG");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let searxng_response: SearXNGResponse = response.json().await?;

        Ok(into_videos(searxng_response, self.max_results))
    }
}
