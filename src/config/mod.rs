//! Configuration module for Wikitree
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wikitree::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wikitree.toml")).unwrap();
//! println!("Fetch attempts per page: {}", config.fetch.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, FailurePolicy, FetchConfig, OutputConfig, RootEntry, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
