//! HTTP client module
//!
//! Provides the signed HTTP transport used by the dashboard client.
//!
//! # Features
//!
//! - **OAuth 1.0a**: Every request signed with the loaded credentials
//! - **JSON bodies**: Parsed for success and error statuses alike
//! - **No retries**: A failed dashboard fetch ends the run

mod client;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, JsonResponse, RequestConfig,
};
