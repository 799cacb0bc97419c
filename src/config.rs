//! Application configuration
//!
//! Settings come from built-in defaults, then an optional YAML file, then
//! command-line flags (applied by the CLI runner).

use crate::engine::{EngineConfig, DEFAULT_PAGE_DELAY};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest page the dashboard endpoint serves
pub const MAX_PAGE_LIMIT: u32 = 20;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API root, without trailing slash
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Pause before every dashboard fetch after the first, in seconds
    pub page_delay_secs: u64,

    /// Page size (1..=20); the service default when unset
    pub page_limit: Option<u32>,

    /// Dashboard content filter; empty string fetches everything
    pub post_type: String,

    /// Emit the resumable cursor after every page
    pub emit_cursor: bool,

    /// Credential file
    pub credentials_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: 30,
            user_agent: format!("dashreel/{}", env!("CARGO_PKG_VERSION")),
            page_delay_secs: DEFAULT_PAGE_DELAY.as_secs(),
            page_limit: None,
            post_type: "photo".to_string(),
            emit_cursor: true,
            credentials_path: default_credentials_path(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.tumblr.com/v2".to_string()
}

/// `~/.dashreel/credentials.json`, or the working directory without a home
pub fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".dashreel"))
        .unwrap_or_default()
        .join("credentials.json")
}

impl AppConfig {
    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Load from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the API would reject
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::invalid_argument("api_base_url", "must not be empty"));
        }
        if let Some(limit) = self.page_limit {
            if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
                return Err(Error::invalid_argument(
                    "page_limit",
                    format!("must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"),
                ));
            }
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(&self.api_base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(&self.user_agent)
            .build()
    }

    /// Engine settings for a run examining `target_count` posts
    pub fn engine_config(&self, target_count: u64) -> EngineConfig {
        let post_type = Some(self.post_type.trim())
            .filter(|t| !t.is_empty())
            .map(String::from);

        EngineConfig::new()
            .with_target_count(target_count)
            .with_page_delay(Duration::from_secs(self.page_delay_secs))
            .with_page_limit(self.page_limit)
            .with_post_type(post_type)
            .with_emit_cursor(self.emit_cursor)
    }
}
