//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the bot identification header
//! - A bounded per-attempt timeout
//! - Retry with exponential backoff and jitter for transient failures
//! - A politeness pause after every attempt, successful or not

use crate::config::{FetchConfig, UserAgentConfig};
use crate::crawler::retry::{Politeness, RetryPolicy};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the fetch layer
///
/// Every variant except [`FetchError::Exhausted`] describes a single failed
/// attempt and is retryable. `Exhausted` is what callers see once the retry
/// budget is spent; it is fatal for that URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("giving up on {url} after {attempts} attempt(s): {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// The URL the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Transport { url, .. }
            | Self::Exhausted { url, .. } => url,
        }
    }

    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Source of raw page HTML
///
/// The crawler only depends on this seam, so traversal can be exercised
/// against an in-memory site as well as the live one.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the HTML body of `url`, failing with [`FetchError::Exhausted`]
    /// once every attempt has failed
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `timeout` - Per-attempt request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wikitree::config::UserAgentConfig;
/// use wikitree::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "WikipediaEduBot".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "bot@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with retry and politeness
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
    politeness: Politeness,
}

impl HttpFetcher {
    /// Creates a fetcher from the user agent and fetch configuration
    pub fn new(user_agent: &UserAgentConfig, config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, config.timeout())?;
        Ok(Self::with_client(
            client,
            RetryPolicy::from_config(config),
            Politeness::from_config(config),
        ))
    }

    pub fn with_client(client: Client, retry: RetryPolicy, politeness: Politeness) -> Self {
        Self {
            client,
            retry,
            politeness,
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Performs a single GET; any non-success status is an error
    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = self.attempt(url).await;

            // Rate limit applies to every attempt regardless of outcome
            let pause = self.politeness.delay(&mut rand::rng());
            tokio::time::sleep(pause).await;

            let error = match result {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            tracing::warn!(
                "Error fetching {} (attempt {}/{}): {}",
                url,
                attempt,
                self.retry.max_attempts,
                error
            );

            if !self.retry.should_retry(attempt) {
                return Err(FetchError::Exhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            let wait = self.retry.backoff(attempt, &mut rand::rng());
            tracing::debug!("Retrying {} in {:?}", url, wait);
            tokio::time::sleep(wait).await;
        }
    }
}
