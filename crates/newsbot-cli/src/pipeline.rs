//! Fetch → parse → dedup → insert, in one sequential pass.
//!
//! Any stage failure aborts the run; nothing is retried. The lookup and the
//! insert are separate requests, so two overlapping runs can both insert
//! the same link.

use newsbot_core::{ConfigError, ImporterConfig, Transport, TransportError};
use newsbot_feed::{fetch_feed, parse_feed, FetchError, ParseError};
use newsbot_store::{filter_new_items, StoreClient, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs one import and returns the number of rows inserted.
///
/// # Errors
///
/// Returns the first [`RunError`] raised by any stage.
pub(crate) async fn run_import<T: Transport>(
    config: &ImporterConfig,
    transport: &T,
) -> Result<usize, RunError> {
    let xml = fetch_feed(transport, &config.feed_url, config.feed_timeout()).await?;
    let items = parse_feed(&xml, config.max_items)?;
    let parsed = items.len();

    let store = StoreClient::new(transport, &config.store_url, &config.service_key)
        .with_timeouts(config.store_read_timeout(), config.store_write_timeout());
    let existing = store
        .fetch_existing_links(config.existing_links_limit)
        .await?;

    let fresh = filter_new_items(items, &existing);
    let inserted = store.insert_news(&config.author_id, &fresh).await?;

    tracing::info!(
        feed = %config.feed_url,
        parsed,
        skipped = parsed - fresh.len(),
        inserted,
        "import complete"
    );
    Ok(inserted)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
