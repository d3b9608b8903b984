//! Feed retrieval and snapshot persistence.
//!
//! [`FeedDownloader`] owns one HTTP client, one query URL, and one feed slot.
//! Fetching replaces the slot with the freshly parsed page; `save`/`load`
//! persist and restore it as a JSON snapshot. Last fetch or load wins.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::error::FeedError;
use super::{Feed, parser};

/// Conventional snapshot location when the caller has no preference.
pub const DEFAULT_SNAPSHOT_PATH: &str = "./feed.json";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/arxiv-digest";

fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("arxiv-digest/{version} (personal-update-tool; +{PROJECT_UA_URL})")
}

/// Fetches and parses arXiv API responses for a stored query URL.
#[derive(Debug, Clone)]
pub struct FeedDownloader {
    client: Client,
    query_url: String,
    feed: Option<Feed>,
}

impl Default for FeedDownloader {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl FeedDownloader {
    /// Creates a downloader for the given query URL.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(query_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            query_url: query_url.into(),
            feed: None,
        }
    }

    /// Replaces the stored query URL. The feed slot is untouched.
    pub fn update_query_url(&mut self, url: impl Into<String>) {
        self.query_url = url.into();
    }

    /// The currently stored query URL.
    #[must_use]
    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// Fetches the stored URL and replaces the feed slot with the parsed page.
    ///
    /// One plain GET, no retry; the caller decides whether and when to try
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Network`] for transport failures,
    /// [`FeedError::HttpStatus`] for non-success responses, and
    /// [`FeedError::Parse`] when the body is not a well-formed feed.
    pub async fn fetch(&mut self) -> Result<(), FeedError> {
        debug!(url = %self.query_url, "fetching feed");
        let response = self
            .client
            .get(&self.query_url)
            .send()
            .await
            .map_err(|e| FeedError::network(&self.query_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::http_status(&self.query_url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::network(&self.query_url, e))?;
        let feed = parser::parse_feed(&body).map_err(|e| FeedError::parse(&self.query_url, e))?;

        info!(entries = feed.len(), "feed fetched");
        self.feed = Some(feed);
        Ok(())
    }

    /// The feed from the last fetch or load.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NoDownloadedFeed`] while the slot is empty.
    pub fn feed(&self) -> Result<&Feed, FeedError> {
        self.feed.as_ref().ok_or(FeedError::NoDownloadedFeed)
    }

    /// Writes the current feed as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NoDownloadedFeed`] while the slot is empty, and
    /// structured encode/IO errors for serialization or filesystem failures.
    pub fn save(&self, path: &Path) -> Result<(), FeedError> {
        let feed = self.feed()?;
        let encoded =
            serde_json::to_string_pretty(feed).map_err(|e| FeedError::encode(path, e))?;
        fs::write(path, encoded).map_err(|e| FeedError::io(path, e))?;
        debug!(path = %path.display(), "feed snapshot saved");
        Ok(())
    }

    /// Restores the feed slot from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NoSavedFeed`] when the path does not exist, and
    /// structured decode/IO errors for filesystem or deserialization failures.
    pub fn load(&mut self, path: &Path) -> Result<(), FeedError> {
        if !path.exists() {
            return Err(FeedError::no_saved_feed(path));
        }
        let raw = fs::read_to_string(path).map_err(|e| FeedError::io(path, e))?;
        let feed = serde_json::from_str(&raw).map_err(|e| FeedError::decode(path, e))?;
        debug!(path = %path.display(), "feed snapshot loaded");
        self.feed = Some(feed);
        Ok(())
    }
}
