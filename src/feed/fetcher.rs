// fetcher.rs
use crate::errors::FeedError;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const USER_AGENT: &str = concat!("property_feed/", env!("CARGO_PKG_VERSION"));

pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FeedError> {
        // None clears reqwest's 30s blocking default
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// One GET, whole body as text. The status code is not checked: a non-2xx
    /// response still hands back its body.
    pub fn fetch(&self, url: &str) -> Result<String, FeedError> {
        info!("Fetching XML feed from {url}");
        let start = Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Feed responded with HTTP {status}, using the body anyway");
        }

        let text = resp
            .text()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        info!("Fetched {} bytes in {:?}", text.len(), start.elapsed());

        Ok(text)
    }
}
