//! Tests for auth module

use super::*;
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// OAuthSigner Tests
// ============================================================================

fn reference_signer() -> OAuthSigner {
    OAuthSigner::new(Credentials::new(
        "xvz1evFS4wEEPTGEFPHBog",
        "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
        "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
    ))
}

#[test]
fn test_signer_reference_vector() {
    let params = vec![
        ("include_entities".to_string(), "true".to_string()),
        (
            "status".to_string(),
            "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
        ),
    ];

    let header = reference_signer()
        .authorization_header_with(
            "POST",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            "1318622958",
        )
        .unwrap();

    assert!(header.starts_with("OAuth "));
    assert!(header.contains(r#"oauth_signature="hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D""#));
    assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
    assert!(header.contains(r#"oauth_signature_method="HMAC-SHA1""#));
}

#[test]
fn test_signer_query_in_url_equals_params() {
    let signer = reference_signer();
    let from_url = signer
        .authorization_header_with(
            "GET",
            "https://api.tumblr.com/v2/user/dashboard?type=photo&offset=20",
            &[],
            "nonce",
            "1700000000",
        )
        .unwrap();
    let from_params = signer
        .authorization_header_with(
            "GET",
            "https://api.tumblr.com/v2/user/dashboard",
            &[
                ("offset".to_string(), "20".to_string()),
                ("type".to_string(), "photo".to_string()),
            ],
            "nonce",
            "1700000000",
        )
        .unwrap();

    assert_eq!(from_url, from_params);
}

#[test]
fn test_signer_fresh_nonce() {
    let signer = reference_signer();
    let url = "https://api.tumblr.com/v2/user/info";
    let a = signer.authorization_header("GET", url, &[]).unwrap();
    let b = signer.authorization_header("GET", url, &[]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_signer_invalid_url() {
    let err = reference_signer()
        .authorization_header("GET", "not a url", &[])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// FileAuthProvider Tests
// ============================================================================

struct FakeExchange {
    calls: Arc<AtomicUsize>,
    result: Credentials,
}

impl TokenExchange for FakeExchange {
    fn exchange(&self, partial: &Credentials) -> Result<Credentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut creds = self.result.clone();
        if !partial.consumer_key.is_empty() {
            creds.consumer_key = partial.consumer_key.clone();
        }
        Ok(creds)
    }
}

#[test]
fn test_provider_uses_complete_file_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.json");
    let creds = Credentials::new("ck", "cs", "at", "as");
    FileAuthProvider::store(&path, &creds).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let provider = FileAuthProvider::with_exchange(Box::new(FakeExchange {
        calls: calls.clone(),
        result: Credentials::new("x", "x", "x", "x"),
    }));

    let loaded = provider.load_or_create(&path).unwrap();
    assert_eq!(loaded, creds);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_provider_missing_file_without_exchange() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let err = FileAuthProvider::new().load_or_create(&path).unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("consumer_key"));
}

#[test]
fn test_provider_malformed_file_without_exchange() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileAuthProvider::new().load_or_create(&path).unwrap_err();
    assert!(err.is_auth_error());
}

#[test]
fn test_provider_exchange_persists_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("creds.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let partial = r#"{"consumer_key": "mine", "consumer_secret": "cs"}"#;
    std::fs::write(&path, partial).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let provider = FileAuthProvider::with_exchange(Box::new(FakeExchange {
        calls: calls.clone(),
        result: Credentials::new("", "cs", "at", "as"),
    }));

    let creds = provider.load_or_create(&path).unwrap();
    assert_eq!(creds, Credentials::new("mine", "cs", "at", "as"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let stored = FileAuthProvider::read(&path).unwrap();
    assert_eq!(stored, creds);
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn test_provider_rejects_incomplete_exchange() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.json");

    let provider = FileAuthProvider::with_exchange(Box::new(FakeExchange {
        calls: Arc::new(AtomicUsize::new(0)),
        result: Credentials::new("ck", "cs", "at", ""),
    }));

    let err = provider.load_or_create(&path).unwrap_err();
    assert!(err.is_auth_error());
    assert!(!path.exists());
}
