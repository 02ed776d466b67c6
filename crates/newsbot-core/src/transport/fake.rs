//! Scripted [`Transport`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

/// Replays queued responses in order and records every request it sees.
///
/// Panics if a request arrives after the queue is exhausted, so an
/// unexpected network call fails the test loudly.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.lock_responses().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    /// Queue a timeout failure.
    #[must_use]
    pub fn time_out(self) -> Self {
        self.lock_responses().push_back(Err(TransportError::Timeout {
            url: "fake://timeout".to_string(),
        }));
        self
    }

    /// Every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("fake transport request log poisoned")
            .clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .expect("fake transport request log poisoned")
            .len()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<HttpResponse, TransportError>>> {
        self.responses
            .lock()
            .expect("fake transport response queue poisoned")
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests
            .lock()
            .expect("fake transport request log poisoned")
            .push(request);
        let next = self.lock_responses().pop_front();
        next.unwrap_or_else(|| panic!("unexpected request to {url}: no response queued"))
    }
}
