//! Credential loading and persistence
//!
//! The agent never prompts on its own. A complete credential file is used
//! as-is; anything else goes through an injected [`TokenExchange`].

use super::types::Credentials;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Produces a validated credential bundle or fails
pub trait AuthProvider: Send + Sync {
    /// Load credentials from `path`, creating them if needed
    fn load_or_create(&self, path: &Path) -> Result<Credentials>;
}

/// Obtains access tokens for a partially filled bundle (for example by an
/// OAuth authorization exchange driven by the embedding application)
pub trait TokenExchange: Send + Sync {
    /// Complete `partial`, returning the full bundle
    fn exchange(&self, partial: &Credentials) -> Result<Credentials>;
}

/// File-backed auth provider
#[derive(Default)]
pub struct FileAuthProvider {
    exchange: Option<Box<dyn TokenExchange>>,
}

impl FileAuthProvider {
    /// Provider that only accepts complete credential files
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that falls back to `exchange` for missing tokens
    pub fn with_exchange(exchange: Box<dyn TokenExchange>) -> Self {
        Self {
            exchange: Some(exchange),
        }
    }

    /// Read a credential file, returning `None` if it is absent or unreadable
    pub fn read(path: &Path) -> Option<Credentials> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No credentials at {}: {e}", path.display());
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(creds) => Some(creds),
            Err(e) => {
                warn!("Ignoring malformed credential file {}: {e}", path.display());
                None
            }
        }
    }

    /// Write credentials to `path` atomically
    pub fn store(path: &Path, creds: &Credentials) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(creds)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, contents).map_err(|e| {
            Error::auth(format!(
                "Failed to write credential file {}: {e}",
                temp_path.display()
            ))
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            Error::auth(format!(
                "Failed to write credential file {}: {e}",
                path.display()
            ))
        })?;

        Ok(())
    }
}

impl AuthProvider for FileAuthProvider {
    fn load_or_create(&self, path: &Path) -> Result<Credentials> {
        let partial = Self::read(path).unwrap_or_default();
        if partial.is_complete() {
            debug!("Loaded credentials from {}", path.display());
            return Ok(partial);
        }

        let Some(exchange) = &self.exchange else {
            return Err(Error::auth(format!(
                "Credential file {} is missing or incomplete (missing: {})",
                path.display(),
                partial.missing_fields().join(", ")
            )));
        };

        let creds = exchange.exchange(&partial)?;
        if !creds.is_complete() {
            return Err(Error::auth(format!(
                "Token exchange returned incomplete credentials (missing: {})",
                creds.missing_fields().join(", ")
            )));
        }

        Self::store(path, &creds)?;
        info!("Saved credentials to {}", path.display());
        Ok(creds)
    }
}

impl std::fmt::Debug for FileAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAuthProvider")
            .field("has_exchange", &self.exchange.is_some())
            .finish()
    }
}
