//! Crawler module for category tree traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry, backoff and a politeness delay
//! - The page adapter that extracts titles, links and sections
//! - Depth-first traversal with deduplication
//! - Crawl statistics

mod coordinator;
mod fetcher;
mod page;
mod retry;
mod sections;
mod stats;

pub use coordinator::{CrawlFailure, CrawlOutcome, Crawler, PageKind};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageSource};
pub use page::{ArticlePage, CategoryPage, Markup, MediaWikiAdapter, PageAdapter};
pub use retry::{Politeness, RetryPolicy};
pub use sections::{count_words, extract_sections};
pub use stats::CrawlStats;

pub use crate::config::FailurePolicy;

use crate::config::Config;
use crate::WikitreeError;

/// Crawls one root category over HTTP
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP fetcher from the user agent and fetch settings
/// 2. Walk the category tree from `root_url`
/// 3. Log a summary with counts and throughput
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root_url` - Absolute URL of the root category, encoded or not
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed
/// * `Err(WikitreeError)` - Crawl failed; no partial records are returned
pub async fn crawl_category(config: &Config, root_url: &str) -> Result<CrawlOutcome, WikitreeError> {
    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetch)?;
    Crawler::new(fetcher, config.crawl.on_failure)
        .crawl(root_url)
        .await
}
