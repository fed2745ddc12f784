use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Wikitree
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Root categories, one per language edition
    #[serde(default, rename = "root")]
    pub roots: Vec<RootEntry>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value as `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Fetch layer timing: per-attempt timeout, retry backoff and politeness delay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FetchConfig {
    /// Per-attempt request timeout (seconds)
    pub timeout_secs: u64,

    /// Total attempts per URL, including the first one
    pub max_attempts: u32,

    /// Backoff before the second attempt (milliseconds); doubles afterwards
    pub initial_backoff_ms: u64,

    /// Upper bound for a single backoff wait (milliseconds)
    pub max_backoff_ms: u64,

    /// Upper bound of the random jitter added to each backoff (milliseconds)
    pub jitter_ms: u64,

    /// Lower bound of the pause after every attempt (milliseconds)
    pub politeness_min_ms: u64,

    /// Upper bound of the pause after every attempt (milliseconds)
    pub politeness_max_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_attempts: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 10_000,
            jitter_ms: 1_000,
            politeness_min_ms: 1_000,
            politeness_max_ms: 2_000,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// What the crawler does when a page cannot be fetched after every attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the whole crawl and discard everything collected so far
    #[default]
    Abort,
    /// Record the failure, drop the page, and keep traversing
    Skip,
}

/// Traversal behaviour
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlConfig {
    pub on_failure: FailurePolicy,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory receiving one `data_<language>.json` file per root
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl OutputConfig {
    /// Path of the record file for a language key
    pub fn data_path(&self, language: &str) -> PathBuf {
        self.directory.join(crate::output::data_file_name(language))
    }
}

/// A root category to crawl, keyed by language edition
#[derive(Debug, Clone, Deserialize)]
pub struct RootEntry {
    /// Language key (e.g., "en", "es"); names the output file
    pub language: String,

    /// Absolute URL of the root category page
    pub url: String,
}
