// config.rs
use crate::errors::FeedError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FEED_URL: &str =
    "https://s3-eu-west-1.amazonaws.com/feeds.agents-society.com/393-ai-feed-869909566.xml";

pub const DEFAULT_OUTPUT: &str = "public/properties.json";

/// Fetch the property feed and write the normalized listings as JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "property_feed", version, about)]
pub struct Config {
    /// Feed to fetch
    #[arg(long, env = "PROPERTY_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Where the JSON ends up
    #[arg(short, long, env = "PROPERTY_FEED_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Read the feed from a local XML file instead of fetching it
    #[arg(short, long, env = "PROPERTY_FEED_INPUT")]
    pub input: Option<PathBuf>,

    /// Request timeout in seconds (no timeout if unset)
    #[arg(long, env = "PROPERTY_FEED_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Checks the parts clap can't: the feed URL has to be http(s).
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.input.is_some() {
            return Ok(());
        }

        let url = Url::parse(&self.feed_url)
            .map_err(|e| FeedError::Config(format!("invalid feed url '{}': {e}", self.feed_url)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(FeedError::Config(format!(
                "unsupported feed url scheme '{other}'"
            ))),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
