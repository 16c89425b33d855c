use crate::config::Config;
use crate::errors::FeedError;
use crate::feed::{parse_tree, FeedFetcher};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod feed;
mod output;

#[cfg(test)]
mod tests;

fn main() {
    let config = Config::parse();

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(&config) {
        Ok(count) => {
            println!("{}", success_notice(count, &config.output));
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Printed to stdout whatever the log filter is.
fn success_notice(count: usize, output: &std::path::Path) -> String {
    format!("✅ Wrote {count} properties to {}", output.display())
}

/// Fetch (or read) → parse → normalize → write. Returns the number of
/// records written.
fn run(config: &Config) -> Result<usize, FeedError> {
    config.validate()?;

    let xml = match &config.input {
        Some(path) => {
            info!("Reading XML feed from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => FeedFetcher::new(config.timeout())?.fetch(&config.feed_url)?,
    };

    info!("Parsing XML...");
    let tree = parse_tree(&xml)?;

    let normalized = domain::normalize_feed(&tree);
    info!(
        "Found {} properties, {} available, {} skipped",
        normalized.total,
        normalized.records.len(),
        normalized.skipped()
    );

    output::write_records(&config.output, &normalized.records)?;

    Ok(normalized.records.len())
}
