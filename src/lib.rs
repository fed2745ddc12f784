//! Wikitree: a polite Wikipedia category-tree crawler
//!
//! This crate walks a Wikipedia category graph from a root category page,
//! recording every category, its member articles, and per-section word
//! counts, so that the same tree can later be compared across language
//! editions.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Wikitree operations
#[derive(Debug, Error)]
pub enum WikitreeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Wikitree operations
pub type Result<T> = std::result::Result<T, WikitreeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_category, CrawlOutcome, CrawlStats, FailurePolicy};
pub use output::{ArticleRecord, CategoryRecord, SectionRecord};
pub use self::url::decode_url;
