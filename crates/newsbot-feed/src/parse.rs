//! RSS document parsing.
//!
//! The whole document is read with `quick-xml` before any item is returned,
//! so a structural error anywhere in the feed rejects the feed as a whole.

use newsbot_core::FeedItem;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::clean::clean_text;
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"description" => Some(Self::Description),
            b"pubDate" => Some(Self::PubDate),
            _ => None,
        }
    }
}

/// Raw field text for one `<item>`. `None` means the child was never seen.
#[derive(Debug, Default)]
struct Candidate {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
}

impl Candidate {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
        }
    }

    fn into_item(self) -> Option<FeedItem> {
        let title = clean_text(self.title.as_deref().unwrap_or_default());
        let link = clean_text(self.link.as_deref().unwrap_or_default());
        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(FeedItem {
            title,
            link,
            description: clean_text(self.description.as_deref().unwrap_or_default()),
            published_at: clean_text(self.pub_date.as_deref().unwrap_or_default()),
        })
    }
}

/// Tracks element nesting and the item currently being collected.
#[derive(Default)]
struct ItemCollector {
    /// Names of the currently open elements, outermost first.
    open: Vec<Vec<u8>>,
    seen_root: bool,
    /// Depth of the open `<item>` element, if any.
    item_depth: Option<usize>,
    current: Candidate,
    /// Field receiving text, and the depth of its element.
    capture: Option<(Field, usize)>,
    candidates: Vec<Candidate>,
}

impl ItemCollector {
    fn open_element(&mut self, name: &[u8], position: u64) -> Result<(), ParseError> {
        if self.open.is_empty() && self.seen_root {
            return Err(malformed(position, "content after the root element"));
        }
        self.seen_root = true;
        // A field's value is its leading text only; a nested element ends it.
        self.capture = None;
        self.open.push(name.to_vec());
        let depth = self.open.len();

        match self.item_depth {
            None if name == b"item" => {
                self.item_depth = Some(depth);
                self.current = Candidate::default();
            }
            Some(item_depth) if depth == item_depth + 1 => {
                if let Some(field) = Field::from_tag(name) {
                    let slot = self.current.slot(field);
                    if slot.is_none() {
                        *slot = Some(String::new());
                        self.capture = Some((field, depth));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close_element(&mut self, name: &[u8], position: u64) -> Result<(), ParseError> {
        let depth = self.open.len();
        match self.open.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(malformed(
                    position,
                    &format!(
                        "expected </{}>, found </{}>",
                        String::from_utf8_lossy(&open),
                        String::from_utf8_lossy(name)
                    ),
                ));
            }
            None => return Err(malformed(position, "closing tag without an open element")),
        }

        if matches!(self.capture, Some((_, d)) if d == depth) {
            self.capture = None;
        }
        if self.item_depth == Some(depth) {
            self.item_depth = None;
            self.candidates.push(std::mem::take(&mut self.current));
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some((field, depth)) = self.capture {
            if depth == self.open.len() {
                if let Some(value) = self.current.slot(field) {
                    value.push_str(text);
                }
            }
        }
    }

    fn finish(self, position: u64) -> Result<Vec<Candidate>, ParseError> {
        if let Some(open) = self.open.last() {
            return Err(malformed(
                position,
                &format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(open)
                ),
            ));
        }
        if !self.seen_root {
            return Err(malformed(position, "document has no root element"));
        }
        Ok(self.candidates)
    }
}

fn malformed(position: u64, reason: &str) -> ParseError {
    ParseError::Malformed {
        position,
        reason: reason.to_string(),
    }
}

/// XML `Name` production, restricted to bytes: non-ASCII bytes are accepted.
fn is_xml_name(name: &[u8]) -> bool {
    let Some((&first, rest)) = name.split_first() else {
        return false;
    };
    let start_ok = first.is_ascii_alphabetic() || first == b'_' || first == b':' || first >= 0x80;
    start_ok
        && rest
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b':') || b >= 0x80)
}

/// Validate a start tag's name and attributes, returning the name.
fn start_tag(e: &BytesStart<'_>, position: u64) -> Result<Vec<u8>, ParseError> {
    let name = e.name().as_ref().to_vec();
    if !is_xml_name(&name) {
        return Err(malformed(
            position,
            &format!("invalid element name <{}>", String::from_utf8_lossy(&name)),
        ));
    }
    // Attributes are checked for syntax and duplicates, never read.
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Xml {
            position,
            source: err.into(),
        })?;
        if !is_xml_name(attr.key.as_ref()) {
            return Err(malformed(
                position,
                &format!(
                    "invalid attribute name {}",
                    String::from_utf8_lossy(attr.key.as_ref())
                ),
            ));
        }
        if attr.value.contains(&b'<') {
            return Err(malformed(position, "'<' in attribute value"));
        }
        attr.unescape_value()
            .map_err(|source| ParseError::Xml { position, source })?;
    }
    Ok(name)
}

/// Parse an RSS document into at most `max_items` cleaned feed items.
///
/// Every `<item>` element is a candidate regardless of nesting depth. Its
/// first direct `<title>`, `<link>`, `<description>` and `<pubDate>` children
/// are read (missing ones count as empty) and cleaned with [`clean_text`].
/// Candidates without a title or link are dropped; the survivors are cut to
/// the first `max_items` in feed order.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] when `quick-xml` rejects the input and
/// [`ParseError::Malformed`] for structural problems it lets through
/// (unclosed elements, missing or repeated root, stray text).
pub fn parse_feed(xml: &str, max_items: usize) -> Result<Vec<FeedItem>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut collector = ItemCollector::default();

    loop {
        let event = reader.read_event().map_err(|source| ParseError::Xml {
            position: reader.error_position(),
            source,
        })?;
        let position = reader.buffer_position();

        match event {
            Event::Start(e) => collector.open_element(&start_tag(&e, position)?, position)?,
            Event::Empty(e) => {
                let name = start_tag(&e, position)?;
                collector.open_element(&name, position)?;
                collector.close_element(&name, position)?;
            }
            Event::End(e) => collector.close_element(e.name().as_ref(), position)?,
            Event::Text(e) => {
                if collector.open.is_empty() {
                    if !e.iter().all(u8::is_ascii_whitespace) {
                        return Err(malformed(position, "text outside the root element"));
                    }
                    continue;
                }
                let text = e
                    .unescape()
                    .map_err(|source| ParseError::Xml { position, source })?;
                collector.text(&text);
            }
            Event::CData(e) => {
                if collector.open.is_empty() {
                    return Err(malformed(position, "CDATA outside the root element"));
                }
                collector.text(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let candidates = collector.finish(reader.buffer_position())?;
    let total = candidates.len();
    let items: Vec<FeedItem> = candidates
        .into_iter()
        .filter_map(Candidate::into_item)
        .take(max_items)
        .collect();

    tracing::debug!(candidates = total, kept = items.len(), max_items, "parsed feed");
    Ok(items)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
