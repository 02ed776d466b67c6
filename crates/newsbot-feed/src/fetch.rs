use std::time::Duration;

use newsbot_core::{HttpRequest, Transport};

use crate::error::FetchError;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetch the raw feed document at `url`.
///
/// # Errors
///
/// - [`FetchError::Status`] if the server answers with a non-2xx status.
/// - [`FetchError::Transport`] on timeout or network failure.
pub async fn fetch_feed<T: Transport>(
    transport: &T,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let request = HttpRequest::get(url).with_timeout(timeout);
    let response = transport.send(request).await?;

    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    tracing::debug!(url, bytes = response.body.len(), "fetched feed");
    Ok(response.body)
}
