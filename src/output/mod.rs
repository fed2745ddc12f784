//! Output module for crawl records and summaries
//!
//! This module handles:
//! - The record shapes handed to downstream consumers
//! - Exporting records as one JSON file per language key
//! - Summarising a finished crawl

mod json;
mod records;
pub mod summary;

pub use json::{data_file_name, read_records, write_records};
pub use records::{ArticleRecord, CategoryRecord, SectionRecord};
pub use summary::{log_start, log_summary, CrawlSummary};
