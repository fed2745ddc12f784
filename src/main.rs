//! Wikitree main entry point
//!
//! Crawls every root category listed in the configuration and writes one
//! record file per language key.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikitree::config::load_config_with_hash;
use wikitree::crawler::crawl_category;
use wikitree::output::write_records;

/// Wikitree: a polite Wikipedia category-tree crawler
///
/// Walks each configured root category, recording subcategories, member
/// articles and per-section word counts, and writes them as
/// `data_<language>.json`.
#[derive(Parser, Debug)]
#[command(name = "wikitree")]
#[command(version)]
#[command(about = "A polite Wikipedia category-tree crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    for root in &config.roots {
        tracing::info!("Crawling [{}] {}", root.language, root.url);

        let outcome = crawl_category(&config, &root.url)
            .await
            .with_context(|| format!("crawl of {} failed", root.url))?;

        let path = config.output.data_path(&root.language);
        write_records(&path, &outcome.records)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikitree=info,warn"),
            1 => EnvFilter::new("wikitree=debug,info"),
            2 => EnvFilter::new("wikitree=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
