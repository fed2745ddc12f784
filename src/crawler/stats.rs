//! Running counters for a single crawl

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Counters accumulated while a crawl runs
///
/// Created once per crawl and only ever incremented. Elapsed time and
/// throughput are derived on demand at the end.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Categories fetched (duplicates are not counted)
    pub categories: u64,
    /// Articles fetched and extracted
    pub articles: u64,
    /// Sections across all fetched articles
    pub sections: u64,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self {
            categories: 0,
            articles: 0,
            sections: 0,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Wall-clock time at which the crawl started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Articles per second over `elapsed`; zero for an empty span
    pub fn throughput(&self, elapsed: Duration) -> f64 {
        let seconds = elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.articles as f64 / seconds
        } else {
            0.0
        }
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}
