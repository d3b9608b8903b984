//! Atom payload parsing for arXiv API responses.
//!
//! The API returns an Atom document with arXiv and OpenSearch extensions.
//! Only the fields the digest needs are extracted; titles and summaries keep
//! the interior line breaks the payload carries, with surrounding whitespace
//! trimmed and the predefined XML entities unescaped.

use chrono::{DateTime, Utc};

use super::error::ParseFeedError;
use super::{Entry, Feed};

/// Parses a response body into a [`Feed`].
pub(crate) fn parse_feed(xml: &str) -> Result<Feed, ParseFeedError> {
    if !xml.contains("<feed") {
        return Err(ParseFeedError::NotAFeed);
    }

    let mut entries = Vec::new();
    for (index, block) in entry_blocks(xml).into_iter().enumerate() {
        entries.push(parse_entry(index, block)?);
    }
    Ok(Feed { entries })
}

/// Extracts each `<entry>...</entry>` region of the document.
fn entry_blocks(xml: &str) -> Vec<&str> {
    const OPEN: &str = "<entry>";
    const CLOSE: &str = "</entry>";

    let mut blocks = Vec::new();
    let mut search_from = 0;
    while let Some(offset) = xml[search_from..].find(OPEN) {
        let start = search_from + offset;
        let Some(end_offset) = xml[start..].find(CLOSE) else {
            break;
        };
        let end = start + end_offset + CLOSE.len();
        blocks.push(&xml[start..end]);
        search_from = end;
    }
    blocks
}

fn parse_entry(index: usize, block: &str) -> Result<Entry, ParseFeedError> {
    let title = tag_text(block, "title").ok_or(ParseFeedError::MissingTag {
        index,
        tag: "title",
    })?;

    let mut authors = Vec::new();
    for author_block in nested_blocks(block, "author") {
        if let Some(name) = tag_text(author_block, "name") {
            authors.push(name);
        }
    }

    // The abstract page link; the entry <id> carries the same URL when no
    // alternate link is present.
    let link = alternate_link(block)
        .or_else(|| tag_text(block, "id"))
        .ok_or(ParseFeedError::MissingTag { index, tag: "id" })?;

    let summary = tag_text(block, "summary").unwrap_or_default();

    let stamp = tag_text(block, "updated")
        .or_else(|| tag_text(block, "published"))
        .ok_or(ParseFeedError::MissingTag {
            index,
            tag: "updated",
        })?;
    let updated = DateTime::parse_from_rfc3339(&stamp)
        .map_err(|e| ParseFeedError::InvalidTimestamp {
            index,
            value: stamp.clone(),
            reason: e.to_string(),
        })?
        .with_timezone(&Utc);

    Ok(Entry {
        title,
        authors,
        link,
        summary,
        updated,
    })
}

/// Extracts each `<tag>...</tag>` region, for container elements like `<author>`.
fn nested_blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let mut blocks = Vec::new();
    let mut search_from = 0;
    while let Some(offset) = xml[search_from..].find(&open) {
        let start = search_from + offset;
        let Some(end_offset) = xml[start..].find(&close) else {
            break;
        };
        let end = start + end_offset + close.len();
        blocks.push(&xml[start..end]);
        search_from = end;
    }
    blocks
}

/// Text content of the first `<tag ...>text</tag>` occurrence, trimmed and unescaped.
fn tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let open_at = xml.find(&open)?;
    let content_start = open_at + xml[open_at..].find('>')? + 1;
    let content_end = content_start + xml[content_start..].find(&close)?;
    Some(unescape(xml[content_start..content_end].trim()))
}

/// Value of a `name="..."` attribute within a single tag's text.
fn attribute(tag: &str, name: &str) -> Option<String> {
    let marker = format!("{name}=\"");
    let start = tag.find(&marker)? + marker.len();
    let end = start + tag[start..].find('"')?;
    Some(unescape(&tag[start..end]))
}

/// The `href` of the abstract-page link: `rel="alternate"` or `type="text/html"`.
fn alternate_link(block: &str) -> Option<String> {
    let mut search_from = 0;
    while let Some(offset) = block[search_from..].find("<link") {
        let start = search_from + offset;
        let Some(end_offset) = block[start..].find('>') else {
            break;
        };
        let end = start + end_offset + 1;
        let tag = &block[start..end];

        let rel = attribute(tag, "rel");
        let link_type = attribute(tag, "type");
        if rel.as_deref() == Some("alternate") || link_type.as_deref() == Some("text/html") {
            if let Some(href) = attribute(tag, "href") {
                return Some(href);
            }
        }
        search_from = end;
    }
    None
}

/// Replaces the five predefined XML entities.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
