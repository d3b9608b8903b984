//! arXiv Digest Core Library
//!
//! This library provides the core functionality for the arxiv-digest tool,
//! which turns saved arXiv searches into plain-text email updates: build a
//! search query, page through the API results until a cutoff date, format the
//! new entries, and hand the digest to the mail sender.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`query`] - Search query construction and URL rendering
//! - [`feed`] - Feed model, Atom parsing, retrieval, and snapshots
//! - [`compose`] - Digest text assembly with the cutoff-date stop condition
//! - [`update`] - Orchestration of the query/fetch/compose pagination loop
//! - [`mail`] - Outbound mail over the SMTP relay
//! - [`app_config`] - File-backed defaults for a run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app_config;
pub mod compose;
pub mod feed;
pub mod mail;
pub mod query;
pub mod update;

// Re-export commonly used types
pub use app_config::FileConfig;
pub use compose::TextComposer;
pub use feed::downloader::{DEFAULT_SNAPSHOT_PATH, FeedDownloader};
pub use feed::error::FeedError;
pub use feed::{Entry, Feed};
pub use mail::{MailError, MailSender};
pub use query::{Category, Connector, DEFAULT_PAGE_SIZE, QueryError, QueryString};
pub use update::{MAX_PAGES, PAGE_SIZE, Update, UpdateError};
