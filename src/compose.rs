//! Digest text assembly.
//!
//! [`TextComposer`] turns parsed feeds into the plain-text body of the update
//! mail. Each entry is rendered as title, comma-joined authors, link, and
//! abstract, with a blank line between entries. An optional cutoff date stops
//! accumulation once a batch reaches entries older than the cutoff.

use chrono::NaiveDate;

use crate::feed::Feed;

/// Accumulates the digest text for one run.
///
/// The buffer starts as the greeting and only ever grows through
/// [`add_feed`](Self::add_feed). One composer per run; no shared state.
#[derive(Debug, Clone)]
pub struct TextComposer {
    text: String,
    cutoff: Option<NaiveDate>,
    entry_count: usize,
}

impl TextComposer {
    /// Creates a composer starting from `greeting` (may be empty), keeping
    /// entries on or after `cutoff` when one is given.
    #[must_use]
    pub fn new(greeting: impl Into<String>, cutoff: Option<NaiveDate>) -> Self {
        Self {
            text: greeting.into(),
            cutoff,
            entry_count: 0,
        }
    }

    /// Replaces the cutoff date.
    pub fn update_cutoff(&mut self, cutoff: NaiveDate) {
        self.cutoff = Some(cutoff);
    }

    /// The current cutoff date, if any.
    #[must_use]
    pub fn cutoff(&self) -> Option<NaiveDate> {
        self.cutoff
    }

    /// Appends a feed's entries to the digest.
    ///
    /// Entries are taken in feed order. When a cutoff is set and an entry's
    /// update date is strictly earlier, that entry and the rest of the batch
    /// are dropped and the call reports `true`: the caller has everything it
    /// asked for. An empty batch also reports `true` (the feed is exhausted).
    /// `false` means every entry was accepted and the next page may hold more.
    pub fn add_feed(&mut self, feed: &Feed) -> bool {
        if !self.text.is_empty() {
            self.text.push('\n');
        }

        let mut first = true;
        for entry in &feed.entries {
            if let Some(cutoff) = self.cutoff
                && entry.updated.date_naive() < cutoff
            {
                return true;
            }
            if !first {
                self.text.push('\n');
            }
            first = false;

            self.text.push_str(&entry.title);
            self.text.push('\n');
            self.text.push_str(&entry.authors.join(", "));
            self.text.push('\n');
            self.text.push_str(&entry.link);
            self.text.push('\n');
            self.text.push_str(&entry.summary);
            self.text.push('\n');
            self.entry_count += 1;
        }
        feed.is_empty()
    }

    /// The accumulated digest text, verbatim.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many entries have been appended across all batches.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::feed::Entry;

    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(title: &str, updated: &str) -> Entry {
        Entry {
            title: title.to_string(),
            authors: vec!["Luiz F. O. Chamon".to_string(), "Cassio G. Lopes".to_string()],
            link: "http://arxiv.org/abs/1608.03248v1".to_string(),
            summary: "Parallel combinations of adaptive filters.".to_string(),
            updated: updated
                .parse::<DateTime<Utc>>()
                .unwrap(),
        }
    }

    #[test]
    fn test_new_composer_text_is_greeting() {
        let composer = TextComposer::new("Hi\nThis is a test text\n", None);
        assert_eq!(composer.text(), "Hi\nThis is a test text\n");
        assert_eq!(composer.entry_count(), 0);
    }

    #[test]
    fn test_cutoff_constructor_and_update() {
        let mut composer = TextComposer::new("", Some(date(2016, 1, 1)));
        assert_eq!(composer.cutoff(), Some(date(2016, 1, 1)));
        composer.update_cutoff(date(2016, 8, 11));
        assert_eq!(composer.cutoff(), Some(date(2016, 8, 11)));
    }

    #[test]
    fn test_empty_feed_on_empty_text_leaves_text_empty() {
        let mut composer = TextComposer::new("", None);
        let done = composer.add_feed(&Feed::default());
        assert!(done);
        assert_eq!(composer.text(), "");
    }

    #[test]
    fn test_single_entry_format() {
        let mut composer = TextComposer::new("", None);
        let feed = Feed {
            entries: vec![entry(
                "Combinations of Adaptive Filters with Coefficients Feedback",
                "2016-08-10T18:42:07Z",
            )],
        };
        let done = composer.add_feed(&feed);
        assert!(!done);
        assert_eq!(
            composer.text(),
            "Combinations of Adaptive Filters with Coefficients Feedback\n\
             Luiz F. O. Chamon, Cassio G. Lopes\n\
             http://arxiv.org/abs/1608.03248v1\n\
             Parallel combinations of adaptive filters.\n"
        );
    }

    #[test]
    fn test_entries_separated_by_blank_line() {
        let mut composer = TextComposer::new("", None);
        let feed = Feed {
            entries: vec![
                entry("First", "2016-08-10T18:42:07Z"),
                entry("Second", "2016-08-10T12:00:00Z"),
            ],
        };
        composer.add_feed(&feed);
        assert!(composer.text().contains("adaptive filters.\n\nSecond\n"));
        assert!(!composer.text().ends_with("\n\n"));
        assert_eq!(composer.entry_count(), 2);
    }

    #[test]
    fn test_greeting_separated_from_entries_by_blank_line() {
        let mut composer = TextComposer::new("Hi\nThis is a test text\n", None);
        let feed = Feed {
            entries: vec![entry("First", "2016-08-10T18:42:07Z")],
        };
        composer.add_feed(&feed);
        assert!(
            composer
                .text()
                .starts_with("Hi\nThis is a test text\n\nFirst\n")
        );
    }

    #[test]
    fn test_second_batch_separated_by_blank_line() {
        let mut composer = TextComposer::new("", None);
        composer.add_feed(&Feed {
            entries: vec![entry("First", "2016-08-10T18:42:07Z")],
        });
        composer.add_feed(&Feed {
            entries: vec![entry("Second", "2016-08-10T12:00:00Z")],
        });
        assert!(composer.text().contains("adaptive filters.\n\nSecond\n"));
    }

    #[test]
    fn test_cutoff_reached_stops_batch_and_appends_nothing() {
        let mut composer = TextComposer::new("", Some(date(2016, 8, 11)));
        let feed = Feed {
            entries: vec![
                entry("Old paper", "2016-08-10T18:42:07Z"),
                entry("Older paper", "2016-08-09T18:42:07Z"),
            ],
        };
        let done = composer.add_feed(&feed);
        assert!(done);
        assert_eq!(composer.text(), "");
        assert_eq!(composer.entry_count(), 0);
    }

    #[test]
    fn test_cutoff_keeps_entries_on_or_after_cutoff_date() {
        let mut composer = TextComposer::new("", Some(date(2016, 8, 10)));
        let feed = Feed {
            entries: vec![
                entry("Same day", "2016-08-10T00:00:01Z"),
                entry("Day before", "2016-08-09T23:59:59Z"),
            ],
        };
        let done = composer.add_feed(&feed);
        assert!(done);
        assert!(composer.text().contains("Same day"));
        assert!(!composer.text().contains("Day before"));
        assert_eq!(composer.entry_count(), 1);
    }

    #[test]
    fn test_no_cutoff_accepts_whole_batch() {
        let mut composer = TextComposer::new("", None);
        let feed = Feed {
            entries: vec![entry("Ancient paper", "2007-01-01T00:00:00Z")],
        };
        assert!(!composer.add_feed(&feed));
        assert!(composer.text().contains("Ancient paper"));
    }

    #[test]
    fn test_empty_feed_with_cutoff_reports_done() {
        let mut composer = TextComposer::new("", Some(date(2016, 8, 11)));
        assert!(composer.add_feed(&Feed::default()));
    }
}
