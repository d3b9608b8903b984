//! Typed model of an arXiv search-result feed, plus retrieval and persistence.
//!
//! [`Feed`] is the parsed form of one API response page. It is produced by
//! [`downloader::FeedDownloader`] (from the network or from a saved snapshot)
//! and only ever read by consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod downloader;
pub mod error;
mod parser;

/// One bibliographic record from a search-result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Title as published, interior line breaks preserved.
    pub title: String,
    /// Author names in publication order.
    pub authors: Vec<String>,
    /// Link to the abstract page.
    pub link: String,
    /// Abstract text, interior line breaks preserved. Empty when absent.
    pub summary: String,
    /// Last-updated timestamp (falls back to the published timestamp).
    pub updated: DateTime<Utc>,
}

/// A parsed search-result page, entries in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub entries: Vec<Entry>,
}

impl Feed {
    /// Number of entries on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the page carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
