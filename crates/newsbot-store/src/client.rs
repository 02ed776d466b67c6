use std::time::Duration;

use newsbot_core::{ExistingLinkSet, FeedItem, HttpRequest, HttpResponse, InsertRow, Transport};
use serde::Deserialize;

use crate::error::StoreError;

pub const NEWS_PATH: &str = "/rest/v1/news";
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an error response body kept in [`StoreError::Status`],
/// measured after whitespace is collapsed so the message stays on one line.
const ERROR_BODY_CHARS: usize = 200;

#[derive(Deserialize)]
struct LinkRow {
    link: Option<String>,
}

/// Client for the `news` collection of a PostgREST store.
///
/// Both calls authenticate with the service key, sent as the `apikey`
/// header and as a bearer token.
pub struct StoreClient<'t, T> {
    transport: &'t T,
    base_url: String,
    service_key: String,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl<T> std::fmt::Debug for StoreClient<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("base_url", &self.base_url)
            .field("service_key", &"[redacted]")
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .finish_non_exhaustive()
    }
}

impl<'t, T: Transport> StoreClient<'t, T> {
    /// Creates a client for the store at `base_url` (trailing slashes are ignored).
    pub fn new(transport: &'t T, base_url: &str, service_key: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, read_timeout: Duration, write_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self.write_timeout = write_timeout;
        self
    }

    fn news_url(&self) -> String {
        format!("{}{NEWS_PATH}", self.base_url)
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("apikey", self.service_key.as_str())
            .with_header("Authorization", format!("Bearer {}", self.service_key))
    }

    /// Fetches the links of the `limit` most recently created rows.
    ///
    /// Rows with a null or empty link are skipped.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Status`] on a non-2xx response.
    /// - [`StoreError::Transport`] on timeout or network failure.
    /// - [`StoreError::Decode`] if the body is not an array of rows.
    pub async fn fetch_existing_links(&self, limit: usize) -> Result<ExistingLinkSet, StoreError> {
        let request = self
            .authorize(HttpRequest::get(self.news_url()))
            .with_query("select", "link")
            .with_query("link", "not.is.null")
            .with_query("order", "created_at.desc")
            .with_query("limit", limit.to_string())
            .with_timeout(self.read_timeout);

        let response = self.transport.send(request).await?;
        ensure_success("lookup", &response)?;

        let rows: Vec<LinkRow> =
            serde_json::from_str(&response.body).map_err(|source| StoreError::Decode {
                operation: "lookup",
                source,
            })?;
        let existing: ExistingLinkSet = rows
            .into_iter()
            .filter_map(|row| row.link)
            .filter(|link| !link.is_empty())
            .collect();

        tracing::debug!(limit, existing = existing.len(), "loaded existing links");
        Ok(existing)
    }

    /// Inserts one row per item in a single batched request.
    ///
    /// Returns the number of rows submitted. An empty `items` slice returns
    /// `0` without contacting the store.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Status`] on a non-2xx response.
    /// - [`StoreError::Transport`] on timeout or network failure.
    /// - [`StoreError::Encode`] if the payload cannot be serialized.
    pub async fn insert_news(&self, author_id: &str, items: &[FeedItem]) -> Result<usize, StoreError> {
        if items.is_empty() {
            tracing::debug!("no new items; skipping insert");
            return Ok(0);
        }

        let rows: Vec<InsertRow> = items
            .iter()
            .map(|item| InsertRow::from_item(author_id, item))
            .collect();
        let payload = serde_json::to_string(&rows).map_err(StoreError::Encode)?;

        let request = self
            .authorize(HttpRequest::post(self.news_url()))
            .with_header("Content-Type", "application/json")
            .with_header("Prefer", "return=minimal")
            .with_body(payload)
            .with_timeout(self.write_timeout);

        let response = self.transport.send(request).await?;
        ensure_success("insert", &response)?;

        tracing::debug!(rows = rows.len(), "inserted news rows");
        Ok(rows.len())
    }
}

/// Keeps the items whose link is not already in the store, preserving order.
#[must_use]
pub fn filter_new_items(items: Vec<FeedItem>, existing: &ExistingLinkSet) -> Vec<FeedItem> {
    items
        .into_iter()
        .filter(|item| !existing.contains(&item.link))
        .collect()
}

fn ensure_success(operation: &'static str, response: &HttpResponse) -> Result<(), StoreError> {
    if response.is_success() {
        return Ok(());
    }
    Err(StoreError::Status {
        operation,
        status: response.status,
        body: response
            .body
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(ERROR_BODY_CHARS)
            .collect(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
