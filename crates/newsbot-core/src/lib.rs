//! Shared building blocks for the news importer.
//!
//! Holds the run configuration, the feed/store data model, and the HTTP
//! transport seam used by the feed and store crates.

pub mod app_config;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use app_config::ImporterConfig;
pub use config::{build_config, load_config, load_config_from_env};
pub use error::{ConfigError, TransportError};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{ExistingLinkSet, FeedItem, InsertRow, MAX_BODY_CHARS};
