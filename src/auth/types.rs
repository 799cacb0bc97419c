//! Credential types

use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth 1.0a credential bundle, stored as a JSON object
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application consumer key
    #[serde(default)]
    pub consumer_key: String,
    /// Application consumer secret
    #[serde(default)]
    pub consumer_secret: String,
    /// User access token
    #[serde(default, alias = "oauth_token", alias = "token")]
    pub access_token: String,
    /// User access token secret
    #[serde(default, alias = "oauth_token_secret", alias = "token_secret")]
    pub access_secret: String,
}

impl Credentials {
    /// Create a credential bundle
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// All four fields are present
    pub fn is_complete(&self) -> bool {
        [
            &self.consumer_key,
            &self.consumer_secret,
            &self.access_token,
            &self.access_secret,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Names of the fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.consumer_key.trim().is_empty() {
            missing.push("consumer_key");
        }
        if self.consumer_secret.trim().is_empty() {
            missing.push("consumer_secret");
        }
        if self.access_token.trim().is_empty() {
            missing.push("access_token");
        }
        if self.access_secret.trim().is_empty() {
            missing.push("access_secret");
        }
        missing
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_credentials_complete() {
        let creds = Credentials::new("ck", "cs", "at", "as");
        assert!(creds.is_complete());
        assert!(creds.missing_fields().is_empty());
    }

    #[test]
    fn test_credentials_incomplete() {
        let creds = Credentials::new("ck", "cs", "", " ");
        assert!(!creds.is_complete());
        let missing = creds.missing_fields();
        assert_eq!(missing, ["access_token", "access_secret"]);
    }

    #[test]
    fn test_credentials_legacy_key_names() {
        let creds: Credentials = serde_json::from_str(
            r#"{"consumer_key":"ck","consumer_secret":"cs","oauth_token":"at","oauth_token_secret":"as"}"#,
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("ck", "cs", "at", "as"));
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials::new("ck", "very-secret", "at", "also-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
        assert!(debug.contains("ck"));
    }
}
