use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{MAX_SEARCH_RESULTS, SearchResult};

pub const GOOGLE_SEARCH_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of web search results for a keyword.
///
/// `Ok` with an empty vector means the search ran and found nothing; `Err`
/// means the search could not be performed.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn fetch_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Custom Search omits `items` entirely when nothing matched
    #[serde(default)]
    items: Vec<SearchItem>,
}

// Any of these may be absent or null on a single item
#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<SearchItem> for SearchResult {
    fn from(item: SearchItem) -> Self {
        SearchResult {
            title: item.title.unwrap_or_default(),
            snippet: item.snippet.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
        }
    }
}

/// Google Custom Search JSON API client
#[derive(Clone)]
pub struct GoogleSearchClient {
    http: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl GoogleSearchClient {
    pub fn new(api_key: &str, engine_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            base_url: GOOGLE_SEARCH_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/customsearch/v1?q={}&key={}&cx={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id)
        )
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn fetch_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        debug!(query = %query, "Google Custom Search request");

        let response = self.http.get(self.search_url(query)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let total = parsed.items.len();

        let results: Vec<SearchResult> = parsed
            .items
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(SearchResult::from)
            .collect();

        info!(
            query = %query,
            total = total,
            kept = results.len(),
            "Search results collected"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn items(n: usize) -> serde_json::Value {
        let items: Vec<_> = (1..=n)
            .map(|i| {
                json!({
                    "kind": "customsearch#result",
                    "title": format!("Mouse {i}"),
                    "snippet": format!("Snippet {i}"),
                    "link": format!("https://shop.example/mouse-{i}"),
                    "displayLink": "shop.example"
                })
            })
            .collect();
        json!({ "kind": "customsearch#search", "items": items })
    }

    fn client_for(server: &MockServer) -> GoogleSearchClient {
        GoogleSearchClient::new("test-key", "test-cx").with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn keeps_only_first_three_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "wireless mouse"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items(5)))
            .expect(1)
            .mount(&server)
            .await;

        let results = client_for(&server)
            .fetch_results("wireless mouse")
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Mouse 1");
        assert_eq!(results[2].link, "https://shop.example/mouse-3");
        assert_eq!(results[1].snippet, "Snippet 2");
    }

    #[tokio::test]
    async fn missing_items_means_no_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "kind": "customsearch#search" })),
            )
            .mount(&server)
            .await;

        let results = client_for(&server).fetch_results("zzzz").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn null_or_missing_item_fields_become_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "title": "A", "link": "https://a.example" },
                    { "title": "B", "snippet": null, "link": "https://b.example" },
                    { "title": null, "snippet": "C snippet", "link": null }
                ]
            })))
            .mount(&server)
            .await;

        let results = client_for(&server)
            .fetch_results("wireless mouse")
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].snippet, "");
        assert_eq!(results[1].title, "B");
        assert_eq!(results[1].snippet, "");
        assert_eq!(results[2].title, "");
        assert_eq!(results[2].snippet, "C snippet");
        assert_eq!(results[2].link, "");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_results("wireless mouse")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Status { status, .. } if status.as_u16() == 403));
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_results("wireless mouse")
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_reported() {
        let client = GoogleSearchClient::new("k", "cx").with_base_url("http://127.0.0.1:1");
        let err = client.fetch_results("wireless mouse").await.unwrap_err();
        assert!(matches!(err, SearchError::Request(_)));
    }

    #[test]
    fn query_is_url_escaped() {
        let client = GoogleSearchClient::new("key", "cx").with_base_url("http://localhost/");
        assert_eq!(
            client.search_url("wireless mouse & pad"),
            "http://localhost/customsearch/v1?q=wireless%20mouse%20%26%20pad&key=key&cx=cx"
        );
    }
}
