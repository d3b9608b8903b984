//! Error types for feed retrieval, parsing, and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Reason a response body failed to parse as an arXiv Atom feed.
///
/// Attached as the source of [`FeedError::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFeedError {
    /// The payload is not an Atom feed document at all.
    #[error("document contains no <feed> element")]
    NotAFeed,

    /// An entry is missing a required element.
    #[error("entry {index} is missing its <{tag}> element")]
    MissingTag {
        /// Zero-based position of the entry in the document.
        index: usize,
        /// Name of the missing element.
        tag: &'static str,
    },

    /// An entry carries a timestamp that is not valid RFC 3339.
    #[error("entry {index} has an invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// Zero-based position of the entry in the document.
        index: usize,
        /// The offending timestamp text.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Errors that can occur while fetching, reading, or persisting a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API returned a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that was fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not a well-formed arXiv Atom feed.
    #[error("malformed feed from {url}: {source}")]
    Parse {
        /// The URL the payload came from.
        url: String,
        /// What exactly failed to parse.
        #[source]
        source: ParseFeedError,
    },

    /// The feed slot is empty: nothing has been fetched or loaded yet.
    #[error("no feed downloaded yet\n  Suggestion: call fetch() or load() before reading the feed")]
    NoDownloadedFeed,

    /// No snapshot exists at the given path.
    #[error("no saved feed at {path}")]
    NoSavedFeed {
        /// The snapshot path that was probed.
        path: PathBuf,
    },

    /// Filesystem failure while reading or writing a snapshot.
    #[error("IO error accessing {path}: {source}")]
    Io {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The feed could not be serialized for persistence.
    #[error("failed to encode feed snapshot for {path}: {source}")]
    Encode {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot on disk could not be deserialized.
    #[error("failed to decode feed snapshot from {path}: {source}")]
    Decode {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying deserializer error.
        #[source]
        source: serde_json::Error,
    },
}

impl FeedError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a parse error for a malformed payload.
    pub fn parse(url: impl Into<String>, source: ParseFeedError) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }

    /// Creates a missing-snapshot error.
    pub fn no_saved_feed(path: impl Into<PathBuf>) -> Self {
        Self::NoSavedFeed { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a snapshot-encoding error.
    pub fn encode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    /// Creates a snapshot-decoding error.
    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}
