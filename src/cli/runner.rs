//! CLI runner - wires configuration, credentials and the client to an action

use crate::actions::{ActionExecutor, ActionOutcome};
use crate::api::{FeedClient, TumblrClient};
use crate::auth::{AuthProvider, FileAuthProvider, OAuthSigner};
use crate::cli::commands::{Action, Cli};
use crate::config::AppConfig;
use crate::engine::PaginationEngine;
use crate::error::Result;
use crate::http::HttpClient;
use crate::output::{build_formatter, OutputFormatter};
use std::io::{self, BufWriter};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Effective configuration: defaults, then `--config`, then flags
    pub fn config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(path) = &self.cli.credentials {
            config.credentials_path.clone_from(path);
        }
        if let Some(delay) = self.cli.delay {
            config.page_delay_secs = delay;
        }
        if let Some(limit) = self.cli.page_limit {
            config.page_limit = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the invocation against the live service, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        debug!(?config, "Effective configuration");

        let credentials = FileAuthProvider::new().load_or_create(&config.credentials_path)?;
        let http = HttpClient::with_signer(config.http_config(), OAuthSigner::new(credentials))?;
        let client = TumblrClient::new(http);

        let mut out = build_formatter(self.cli.format, BufWriter::new(io::stdout()));
        self.execute(&config, &client, out.as_mut()).await
    }

    /// Run the invocation against `client`
    pub async fn execute(
        &self,
        config: &AppConfig,
        client: &dyn FeedClient,
        out: &mut dyn OutputFormatter,
    ) -> Result<()> {
        let identity = client.who_am_i().await?;
        info!(user = %identity.name, "Authenticated");

        let executor = ActionExecutor::new(client, &identity);
        let outcome = match self.cli.action() {
            Action::Reblog(target) => executor.reblog(&target, out).await?,
            Action::PostImage(request) => executor.post_image(&request, out).await?,
            Action::Paginate(start) => {
                let engine = PaginationEngine::new(config.engine_config(self.cli.count), start);
                let summary = engine.run(client, &identity.name, out).await?;
                info!(
                    pages = summary.pages,
                    posts = summary.posts_fetched,
                    entries = summary.entries_emitted,
                    duplicates = summary.duplicates,
                    self_authored = summary.self_authored,
                    malformed_posts = summary.malformed_posts,
                    reached_end = summary.reached_end,
                    "Run complete"
                );
                if let Some(cursor) = summary.final_cursor {
                    let flag = cursor.name().replace('_', "-");
                    info!("Resume with --{flag} {}", cursor.value());
                }
                return Ok(());
            }
        };

        if let ActionOutcome::Succeeded(response) = outcome {
            debug!(body = %response.body, "Action accepted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CommandFormatter;
    use crate::testing::{posts, MemoryFeed};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn runner(args: &[&str]) -> Runner {
        let args = std::iter::once("dashreel").chain(args.iter().copied());
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashreel.yaml");
        std::fs::write(&path, "page_delay_secs: 7\npage_limit: 10\n").unwrap();
        let path = path.to_string_lossy().to_string();

        let config = runner(&[
            "-C",
            &path,
            "--page-limit",
            "5",
            "--credentials",
            "/tmp/c.json",
        ])
        .config()
        .unwrap();

        assert_eq!(config.page_delay_secs, 7);
        assert_eq!(config.page_limit, Some(5));
        assert_eq!(config.credentials_path, PathBuf::from("/tmp/c.json"));
    }

    #[test]
    fn test_invalid_page_limit_flag() {
        assert!(runner(&["--page-limit", "21"]).config().is_err());
    }

    #[tokio::test]
    async fn test_execute_paginates_by_default() {
        let feed = MemoryFeed::new(posts([3, 2, 1], "other"), 20);
        let runner = runner(&["-n", "3", "-f", "structured", "--delay", "0"]);
        let config = runner.config().unwrap();

        let mut out = CommandFormatter::new(Vec::new());
        runner.execute(&config, &feed, &mut out).await.unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert_eq!(text.matches("push-url").count(), 3);
        assert!(text.ends_with("set-env before_id 1\n"));
    }

    #[tokio::test]
    async fn test_execute_rejected_reblog_is_not_an_error() {
        let feed = MemoryFeed::new(Vec::new(), 20)
            .with_write_response(json!({"status": 403, "errors": ["blocked"]}));
        let runner = runner(&["--reblog", "9/key"]);
        let config = runner.config().unwrap();

        let mut out = CommandFormatter::new(Vec::new());
        runner.execute(&config, &feed, &mut out).await.unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "message blocked\n");
        assert_eq!(feed.writes(), vec!["reblog me.tumblr.com 9/key"]);
        assert!(feed.requests().is_empty());
    }
}
