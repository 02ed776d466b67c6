use std::time::Duration;

use reqwest::Client;

use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// The per-request timeout comes from [`HttpRequest::timeout`]; connection
/// setup is capped at 10 seconds.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
            timeout,
        } = request;

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(&url, e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(&url, e))?;

        tracing::debug!(url = %url, status, bytes = body.len(), "http exchange complete");
        Ok(HttpResponse { status, body })
    }
}

fn classify(url: &str, source: reqwest::Error) -> TransportError {
    if source.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            source,
        }
    }
}
