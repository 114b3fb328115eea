// Test doubles for the two outbound collaborators.
//
// - StubSearch (SearchProvider): fixed results, no matches, or a failure
// - StubGenerator (ContentGenerator): fixed reply or failure, records prompts
//
// Both count calls so tests can assert that a stage was skipped.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::generator::ContentGenerator;
use crate::models::SearchResult;
use crate::search::{SearchError, SearchProvider};

/// `n` distinct search results titled "Result 1".."Result n"
pub fn sample_results(n: usize) -> Vec<SearchResult> {
    (1..=n)
        .map(|i| SearchResult {
            title: format!("Result {i}"),
            snippet: format!("Snippet {i}"),
            link: format!("https://example.com/{i}"),
        })
        .collect()
}

/// A model reply in the expected shape with `faq_count` FAQ entries
pub fn sample_document_json(faq_count: usize) -> serde_json::Value {
    let faq: Vec<_> = (1..=faq_count)
        .map(|i| json!({ "question": format!("Question {i}?"), "answer": format!("Answer {i}.") }))
        .collect();
    json!({
        "seoTitle": "Best Wireless Mouse for Work and Play",
        "metaDescription": "Shop ergonomic wireless mice with long battery life.",
        "seoKeywords": ["wireless mouse", "bluetooth mouse", "ergonomic mouse"],
        "productDescription": "A comfortable wireless mouse with precise tracking.",
        "suggestedPricing": "$20 - $80",
        "faq": faq
    })
}

// ---------------------------------------------------------------------------
// StubSearch
// ---------------------------------------------------------------------------

enum SearchReply {
    Results(Vec<SearchResult>),
    Failure(String),
}

pub struct StubSearch {
    reply: SearchReply,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StubSearch {
    /// Returns `results` as-is, so tests control the count the provider hands back
    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self::with_reply(SearchReply::Results(results))
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(SearchReply::Failure(message.to_string()))
    }

    fn with_reply(reply: SearchReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn fetch_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        match &self.reply {
            SearchReply::Results(results) => Ok(results.clone()),
            SearchReply::Failure(message) => Err(SearchError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: message.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// StubGenerator
// ---------------------------------------------------------------------------

pub struct StubGenerator {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(system, prompt)` of the most recent call
    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.reply.clone().map_err(anyhow::Error::msg)
    }
}
