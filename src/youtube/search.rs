//! Search lookup against the remote search endpoint.
//!
//! Calls `{base}/search?q={query}&limit=1` and surfaces only the top hit.
//! Returns `None` silently on any error — a search miss, a backend
//! hiccup, and a malformed body all look the same to callers, so the bot
//! degrades to "no result" instead of failing. The call suspends only the
//! calling task; nothing here blocks the runtime.

use crate::core::config;
use reqwest::Client;
use serde::Deserialize;

/// A single search result record.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Video id
    pub id: String,
    /// Video title
    pub title: String,
    /// Duration string, e.g. "4:33"
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Canonical watch URL
    pub url: String,
}

fn default_duration() -> String {
    "0:00".to_string()
}

/// Client for the search backend.
pub struct SearchClient {
    http: Client,
    base_url: String,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchClient {
    /// Create a client against the configured API base URL.
    pub fn new() -> Self {
        Self::with_base_url(config::API_BASE_URL.as_str())
    }

    /// Create a client against an explicit base URL. Used by tests to
    /// point at a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(config::search::timeout())
            .build()
            .expect("HTTP client build failed: timeout config should always succeed");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Single top-result lookup for a free-text query or URL.
    pub async fn search_first(&self, query: &str) -> Option<SearchHit> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            log::debug!("Search backend returned status {} for {:?}", response.status(), query);
            return None;
        }

        let hits: Vec<SearchHit> = response.json().await.ok()?;
        hits.into_iter().next()
    }
}
