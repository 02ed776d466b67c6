//! One-shot news importer.
//!
//! Reads configuration from the environment, imports new feed items into the
//! store, and prints a single result line. Intended to be run from cron.

mod pipeline;

use std::process::ExitCode;

use newsbot_core::ReqwestTransport;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(inserted) => {
            println!("Inserted {inserted} items.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", failure_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// Render a run failure as the single diagnostic line.
///
/// Stage errors already embed their causes in `Display`, so only the
/// outermost message is printed.
fn failure_line(err: &anyhow::Error) -> String {
    format!("Import failed: {err}")
}

async fn run() -> anyhow::Result<usize> {
    // Configuration is resolved before any network client exists.
    let config = newsbot_core::load_config().map_err(pipeline::RunError::from)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    // Logs go to stderr; stdout carries only the result line.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "loaded configuration");

    let transport = ReqwestTransport::new(&config.user_agent).map_err(pipeline::RunError::from)?;
    let inserted = pipeline::run_import(&config, &transport).await?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use newsbot_core::transport::fake::FakeTransport;
    use newsbot_core::ConfigError;

    use super::*;
    use crate::pipeline::RunError;

    #[test]
    fn config_failure_line() {
        let err = anyhow::Error::from(RunError::from(ConfigError::MissingEnvVar(
            "SUPABASE_URL".to_string(),
        )));
        assert_eq!(failure_line(&err), "Import failed: SUPABASE_URL is not set");
    }

    #[test]
    fn xml_failure_names_the_cause_once() {
        let parse_err = newsbot_feed::parse_feed("<a></b>", 30).expect_err("mismatched tags");
        let err = anyhow::Error::from(RunError::from(parse_err));
        let line = failure_line(&err);

        assert!(line.starts_with("Import failed: "), "{line}");
        assert_eq!(line.matches("</b>").count(), 1, "{line}");
        assert_eq!(line.lines().count(), 1);
    }

    #[tokio::test]
    async fn store_failure_with_multiline_body_is_one_line() {
        let transport = FakeTransport::new()
            .respond(
                200,
                "<rss><item><title>T</title><link>https://a/1</link></item></rss>",
            )
            .respond(
                502,
                "<html>\n<head><title>502 Bad Gateway</title></head>\n</html>",
            );
        let config = newsbot_core::build_config(|key| match key {
            "SUPABASE_URL" => Ok("https://store.example".to_string()),
            "SUPABASE_SERVICE_ROLE_KEY" => Ok("service-key".to_string()),
            "NEWS_BOT_USER_ID" => Ok("bot-id".to_string()),
            _ => Err(std::env::VarError::NotPresent),
        })
        .unwrap();

        let err = pipeline::run_import(&config, &transport)
            .await
            .expect_err("lookup should fail");
        let line = failure_line(&anyhow::Error::from(err));

        assert_eq!(
            line,
            "Import failed: store lookup returned HTTP 502: \
             <html> <head><title>502 Bad Gateway</title></head> </html>"
        );
    }
}
