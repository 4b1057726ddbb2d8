//! HTTP fetcher implementation
//!
//! This module handles every request the harvester makes, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for listing and detail pages
//! - Classifying responses into found / not found / failed
//!
//! The fetcher never retries; the crawl loop decides what a failure means.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the document
    Ok {
        /// Final URL after redirects
        final_url: String,
        /// Document body
        body: String,
    },

    /// The address does not exist (HTTP 404)
    NotFound,

    /// Any other transport-level outcome (timeout, connection error, non-2xx status)
    Failure {
        /// Error description
        reason: String,
    },
}

/// Capability to retrieve the raw document behind an address
///
/// One call performs exactly one network retrieval.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Sets up the fetch layer
    ///
    /// Failure here is fatal to the run.
    pub fn new(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, HarvestError> {
        let timeout = Duration::from_secs(crawler.request_timeout_secs);
        let client = build_http_client(user_agent, timeout)
            .map_err(|e| HarvestError::Setup(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL and classifies the outcome
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 2xx | Ok |
    /// | HTTP 404 | NotFound |
    /// | Other HTTP status | Failure |
    /// | Timeout | Failure |
    /// | Connection refused | Failure |
    /// | Body read error | Failure |
    async fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify_error(&e),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return FetchResult::NotFound;
        }

        if !status.is_success() {
            return FetchResult::Failure {
                reason: format!("HTTP {}", status.as_u16()),
            };
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => FetchResult::Ok { final_url, body },
            Err(e) => classify_error(&e),
        }
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let reason = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchResult::Failure { reason }
}
