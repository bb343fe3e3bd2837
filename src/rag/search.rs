use crate::domain::model::WebResult;
use crate::domain::ports::WebSearch;
use crate::utils::error::{DrillError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const TAVILY_URL: &str = "https://api.tavily.com/search";
pub const DEFAULT_MAX_RESULTS: u32 = 3;
pub const DEFAULT_SEARCH_DEPTH: &str = "basic";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl From<SearchHit> for WebResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.title.unwrap_or_else(|| "Web Result".to_string()),
            url: hit.url,
            content: hit.content,
        }
    }
}

/// Tavily 搜尋 API
#[derive(Debug, Clone)]
pub struct TavilySearch {
    client: Client,
    endpoint: String,
    api_key: String,
    max_results: u32,
    search_depth: String,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: TAVILY_URL.to_string(),
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_RESULTS,
            search_depth: DEFAULT_SEARCH_DEPTH.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

#[async_trait]
impl WebSearch for TavilySearch {
    async fn search(&self, query: &str) -> Result<Vec<WebResult>> {
        tracing::debug!("🔍 Searching web for: {}", query);
        let body = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
            search_depth: &self.search_depth,
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DrillError::ExternalServiceError {
                service: "Tavily".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        let results: Vec<WebResult> = parsed.results.into_iter().map(WebResult::from).collect();
        tracing::debug!("📥 Got {} results from Tavily", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_search_maps_results() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/search").json_body(serde_json::json!({
                "api_key": "tvly-key",
                "query": "rust news",
                "max_results": 3,
                "search_depth": "basic"
            }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "results": [
                        {"title": "Rust 2.0", "url": "https://example.com/a", "content": "big news"},
                        {"url": "https://example.com/b", "content": "untitled"}
                    ]
                }));
        });

        let search = TavilySearch::new("tvly-key").with_endpoint(server.url("/search"));
        let results = search.search("rust news").await.unwrap();

        api_mock.assert();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust 2.0");
        assert_eq!(results[1].title, "Web Result");
        assert_eq!(results[1].url, "https://example.com/b");
    }

    #[tokio::test]
    async fn test_search_failure_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(432).body("usage limit exceeded");
        });

        let search = TavilySearch::new("tvly-key").with_endpoint(server.url("/search"));
        let err = search.search("anything").await.unwrap_err();
        assert!(err.to_string().contains("usage limit exceeded"));
        assert!(err.to_string().contains("432"));
    }
}
