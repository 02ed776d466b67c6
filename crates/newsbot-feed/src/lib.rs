//! Feed retrieval and parsing.
//!
//! [`fetch_feed`] pulls the raw RSS document, [`parse_feed`] turns it into
//! cleaned [`newsbot_core::FeedItem`]s, and [`clean_text`] is the markup and
//! whitespace scrubber applied to every field.

pub mod clean;
pub mod error;
pub mod fetch;
pub mod parse;

pub use clean::clean_text;
pub use error::{FetchError, ParseError};
pub use fetch::{fetch_feed, DEFAULT_FETCH_TIMEOUT};
pub use parse::parse_feed;
