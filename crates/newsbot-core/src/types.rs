use std::collections::HashSet;

use serde::Serialize;

/// Upper bound on [`InsertRow::body`], in characters.
pub const MAX_BODY_CHARS: usize = 800;

/// One cleaned `<item>` from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Canonical article URL; doubles as the dedup key.
    pub link: String,
    pub description: String,
    /// Raw `pubDate` text, cleaned but not parsed.
    pub published_at: String,
}

/// Links already present in the store, bounded to the most recent rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingLinkSet {
    links: HashSet<String>,
}

impl ExistingLinkSet {
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExistingLinkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A row for the store's `news` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertRow {
    pub author_id: String,
    pub title: String,
    /// Never longer than [`MAX_BODY_CHARS`] characters.
    pub body: String,
    pub link: String,
}

impl InsertRow {
    /// Derive a row from a feed item.
    ///
    /// The body is the description, or the title when the description is
    /// empty, cut to the first [`MAX_BODY_CHARS`] characters.
    #[must_use]
    pub fn from_item(author_id: &str, item: &FeedItem) -> Self {
        let source = if item.description.is_empty() {
            &item.title
        } else {
            &item.description
        };
        Self {
            author_id: author_id.to_string(),
            title: item.title.clone(),
            body: truncate_chars(source, MAX_BODY_CHARS),
            link: item.link.clone(),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
