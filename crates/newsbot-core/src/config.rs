use crate::app_config::ImporterConfig;
use crate::ConfigError;

pub const DEFAULT_FEED_URL: &str = "https://kathmandupost.com/rss";
pub const DEFAULT_USER_AGENT: &str = "newsbot/0.1 (news-importer)";

/// Load importer configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config() -> Result<ImporterConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load importer configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config_from_env() -> Result<ImporterConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build importer configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
///
/// # Errors
///
/// Returns `ConfigError` if required vars are missing or values are invalid.
pub fn build_config<F>(lookup: F) -> Result<ImporterConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // An exported-but-empty variable is as good as unset.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let store_url = require("SUPABASE_URL")?;
    let service_key = require("SUPABASE_SERVICE_ROLE_KEY")?;
    let author_id = require("NEWS_BOT_USER_ID")?;

    let feed_url = or_default("KTM_POST_RSS_URL", DEFAULT_FEED_URL);
    let max_items = parse_usize("NEWS_MAX_ITEMS", "30")?;
    let existing_links_limit = parse_usize("NEWS_EXISTING_LINKS_LIMIT", "500")?;
    if existing_links_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWS_EXISTING_LINKS_LIMIT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let feed_timeout_secs = parse_u64("NEWS_FEED_TIMEOUT_SECS", "20")?;
    let store_read_timeout_secs = parse_u64("NEWS_STORE_READ_TIMEOUT_SECS", "20")?;
    let store_write_timeout_secs = parse_u64("NEWS_STORE_WRITE_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEWS_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("NEWSBOT_LOG_LEVEL", "warn");

    Ok(ImporterConfig {
        feed_url,
        store_url,
        service_key,
        author_id,
        max_items,
        existing_links_limit,
        feed_timeout_secs,
        store_read_timeout_secs,
        store_write_timeout_secs,
        user_agent,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
