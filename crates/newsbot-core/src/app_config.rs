use std::time::Duration;

/// Resolved configuration for one importer run.
///
/// Built once in `main` and passed by reference to every stage.
#[derive(Clone)]
pub struct ImporterConfig {
    pub feed_url: String,
    pub store_url: String,
    pub service_key: String,
    pub author_id: String,
    pub max_items: usize,
    pub existing_links_limit: usize,
    pub feed_timeout_secs: u64,
    pub store_read_timeout_secs: u64,
    pub store_write_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl ImporterConfig {
    #[must_use]
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    #[must_use]
    pub fn store_read_timeout(&self) -> Duration {
        Duration::from_secs(self.store_read_timeout_secs)
    }

    #[must_use]
    pub fn store_write_timeout(&self) -> Duration {
        Duration::from_secs(self.store_write_timeout_secs)
    }
}

impl std::fmt::Debug for ImporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterConfig")
            .field("feed_url", &self.feed_url)
            .field("store_url", &self.store_url)
            .field("service_key", &"[redacted]")
            .field("author_id", &self.author_id)
            .field("max_items", &self.max_items)
            .field("existing_links_limit", &self.existing_links_limit)
            .field("feed_timeout_secs", &self.feed_timeout_secs)
            .field("store_read_timeout_secs", &self.store_read_timeout_secs)
            .field("store_write_timeout_secs", &self.store_write_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
