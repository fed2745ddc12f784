//! End-of-crawl summary
//!
//! The summary is derived from the crawl's counters once the traversal is
//! over. It is reported through the log, not persisted with the records.

use crate::crawler::CrawlStats;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only summary of a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub root_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub categories: u64,
    pub articles: u64,
    pub sections: u64,
    /// Pages given up on (always zero when the crawl aborts on failure)
    pub failures: usize,
    pub execution_seconds: f64,
    /// Articles per second
    pub throughput: f64,
}

impl CrawlSummary {
    /// Snapshots the counters at the end of a crawl
    pub fn from_stats(root_url: &str, stats: &CrawlStats, failures: usize) -> Self {
        let elapsed = stats.elapsed();
        Self {
            root_url: root_url.to_string(),
            started_at: stats.started_at(),
            finished_at: Utc::now(),
            categories: stats.categories,
            articles: stats.articles,
            sections: stats.sections,
            failures,
            execution_seconds: elapsed.as_secs_f64(),
            throughput: stats.throughput(elapsed),
        }
    }
}

fn banner_width(url: &str) -> usize {
    url.chars().count() + 20
}

/// Logs the opening banner for a crawl
pub fn log_start(url: &str) {
    let width = banner_width(url);
    tracing::info!("{}", "=".repeat(width));
    tracing::info!("{:=^width$}", "  Start Execution ", width = width);
    tracing::info!("{:=^width$}", format!("  URL: {} ", url), width = width);
    tracing::info!("{}", "=".repeat(width));
}

/// Logs the closing banner with counts, execution time and throughput
pub fn log_summary(summary: &CrawlSummary) {
    let width = banner_width(&summary.root_url);
    tracing::info!("{}", "=".repeat(width));
    tracing::info!("{:=^width$}", "  Finished Execution Summary ", width = width);
    tracing::info!(
        "{:=^width$}",
        format!("  URL: {} ", summary.root_url),
        width = width
    );
    tracing::info!("{}", "=".repeat(width));
    tracing::info!("{:<20} {}", "Categories:", summary.categories);
    tracing::info!("{:<20} {}", "Articles:", summary.articles);
    tracing::info!("{:<20} {}", "Sections:", summary.sections);
    if summary.failures > 0 {
        tracing::warn!("{:<20} {}", "Failed pages:", summary.failures);
    }
    tracing::info!("{:<20} {:.2}s", "Execution Time:", summary.execution_seconds);
    tracing::info!(
        "{:<20} {:.2} articles/second",
        "Throughput:",
        summary.throughput
    );
    tracing::info!("{}", "=".repeat(width));
}
