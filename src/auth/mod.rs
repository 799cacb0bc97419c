//! Authentication module
//!
//! Credential bundles, the `AuthProvider` seam that yields them, and the
//! OAuth 1.0a signer that applies them to outgoing requests.

mod provider;
mod signer;
mod types;

pub use provider::{AuthProvider, FileAuthProvider, TokenExchange};
pub use signer::OAuthSigner;
pub use types::Credentials;

#[cfg(test)]
mod tests;
