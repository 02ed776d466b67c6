use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Strip markup from feed text and normalize whitespace.
///
/// Tags are replaced by a space, HTML entities are decoded, and every run of
/// whitespace (including the non-breaking space `&nbsp;` decodes to) becomes
/// a single space. The result is trimmed.
///
/// Entities are decoded after tags are stripped, so escaped markup such as
/// `&lt;b&gt;` survives as literal text.
#[must_use]
pub fn clean_text(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let stripped = TAG_RE.replace_all(value, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
