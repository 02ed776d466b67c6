use newsbot_core::TransportError;
use thiserror::Error;

/// Feed retrieval failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The feed body is not a well-formed XML document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed feed at byte {position}: {reason}")]
    Malformed { position: u64, reason: String },
}
