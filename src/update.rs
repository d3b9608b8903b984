//! Orchestration of one digest run: query, paginate, compose.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::compose::TextComposer;
use crate::feed::downloader::FeedDownloader;
use crate::feed::error::FeedError;
use crate::query::{Connector, QueryError, QueryString};

/// Results requested per page while paginating.
pub const PAGE_SIZE: usize = 10;

/// Upper bound on pages fetched in one run.
///
/// The composer normally terminates the loop at the cutoff date or on an
/// exhausted feed; the cap keeps a misbehaving remote from turning the run
/// into an endless poll.
pub const MAX_PAGES: u32 = 50;

/// Errors that can occur during a digest run.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Glues the query builder, downloader, and composer into one run.
///
/// Typical flow: construct with the cutoff date, add search terms, call
/// [`search`](Self::search), then read [`digest`](Self::digest).
pub struct Update {
    query: QueryString,
    composer: TextComposer,
    max_pages: u32,
}

impl Update {
    /// Creates a run collecting entries updated on or after `since`, with the
    /// standard greeting line.
    #[must_use]
    pub fn new(since: NaiveDate) -> Self {
        let greeting = format!("arXiv update since {since}:\n");
        Self::with_greeting(since, greeting)
    }

    /// Creates a run with a custom greeting at the top of the digest.
    #[must_use]
    pub fn with_greeting(since: NaiveDate, greeting: impl Into<String>) -> Self {
        Self {
            query: QueryString::new(),
            composer: TextComposer::new(greeting, Some(since)),
            max_pages: MAX_PAGES,
        }
    }

    /// Points the query at a different API endpoint (used by tests).
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.query.set_base_url(base_url);
    }

    /// Sets the join rule between the author block and the keyword block.
    pub fn set_connector(&mut self, connector: Connector) {
        self.query.set_connector(connector);
    }

    /// Replaces the page cap for this run.
    pub fn set_max_pages(&mut self, max_pages: u32) {
        self.max_pages = max_pages;
    }

    /// Adds authors to search for.
    pub fn add_authors<I>(&mut self, authors: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for author in authors {
            self.query.add_author(author);
        }
    }

    /// Adds keywords to search for in titles.
    pub fn add_title_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for word in words {
            self.query.add_title_word(word);
        }
    }

    /// Adds keywords to search for in abstracts.
    pub fn add_abstract_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for word in words {
            self.query.add_abstract_word(word);
        }
    }

    /// Adds categories to search in, parsing each name.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidCategory`] for an unrecognized name;
    /// names before the bad one are already added.
    pub fn add_categories<'a, I>(&mut self, names: I) -> Result<(), QueryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.query.add_category(name.parse()?);
        }
        Ok(())
    }

    /// Fetches result pages into the digest until the cutoff is reached, the
    /// feed is exhausted, or the page cap is hit.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyQuery`] (via [`UpdateError::Query`]) when no
    /// search terms were added, and any fetch failure via
    /// [`UpdateError::Feed`].
    pub async fn search(&mut self, downloader: &mut FeedDownloader) -> Result<(), UpdateError> {
        downloader.update_query_url(self.query.render()?);
        downloader.fetch().await?;

        let mut pages = 1u32;
        while !self.composer.add_feed(downloader.feed()?) {
            if pages >= self.max_pages {
                warn!(
                    pages,
                    "stopping pagination at the page cap; digest may be incomplete"
                );
                break;
            }
            self.query.advance_page(PAGE_SIZE);
            downloader.update_query_url(self.query.render()?);
            downloader.fetch().await?;
            pages += 1;
        }

        debug!(
            pages,
            entries = self.composer.entry_count(),
            "search finished"
        );
        Ok(())
    }

    /// The digest text collected so far.
    #[must_use]
    pub fn digest(&self) -> &str {
        self.composer.text()
    }

    /// True once at least one entry has been appended.
    #[must_use]
    pub fn has_new_entries(&self) -> bool {
        self.composer.entry_count() > 0
    }

    /// Whether the digest should be mailed, honoring the suppress flag.
    #[must_use]
    pub fn should_send(&self, suppress: bool) -> bool {
        !suppress || self.has_new_entries()
    }
}
