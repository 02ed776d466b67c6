use newsbot_core::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-2xx status.
    #[error("store {operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        /// Leading part of the response body, for diagnostics.
        body: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("could not decode store {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode insert payload: {0}")]
    Encode(#[source] serde_json::Error),
}
