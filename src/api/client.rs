//! Dashboard API client
//!
//! `FeedClient` is the seam the engine and the actions talk to;
//! `TumblrClient` implements it over the signed HTTP client.

use super::types::{
    ApiResponse, DashboardParams, Page, PostImageRequest, ReblogTarget, UserIdentity,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, JsonResponse, RequestConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Remote feed operations. One call per method invocation, no retries.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch one dashboard page. Any non-success response is an error.
    async fn fetch_dashboard(&self, params: &DashboardParams) -> Result<Page>;

    /// Reblog a post onto `blog`. Rejections come back in the response.
    async fn reblog(&self, blog: &str, target: &ReblogTarget) -> Result<ApiResponse>;

    /// Create a photo post on `blog`. Rejections come back in the response.
    async fn post_image(&self, blog: &str, request: &PostImageRequest) -> Result<ApiResponse>;

    /// Identify the authenticated account
    async fn who_am_i(&self) -> Result<UserIdentity>;
}

/// Tumblr v2 API client
#[derive(Debug)]
pub struct TumblrClient {
    http: HttpClient,
}

impl TumblrClient {
    /// Create a client over a configured (and signed) HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// GET `path`, failing on any non-success envelope
    async fn get_response(&self, path: &str, config: RequestConfig) -> Result<Value> {
        let response = self.http.get_json(path, config).await?;
        into_payload(response)
    }
}

#[async_trait]
impl FeedClient for TumblrClient {
    async fn fetch_dashboard(&self, params: &DashboardParams) -> Result<Page> {
        debug!(?params, "Fetching dashboard page");
        let payload = self
            .get_response("/user/dashboard", params.to_request())
            .await?;
        Page::from_response(&payload)
    }

    async fn reblog(&self, blog: &str, target: &ReblogTarget) -> Result<ApiResponse> {
        let path = format!("/blog/{blog}/post/reblog");
        let response = self.http.post_json(&path, target.to_request()).await?;
        Ok(ApiResponse::from_envelope(&response))
    }

    async fn post_image(&self, blog: &str, request: &PostImageRequest) -> Result<ApiResponse> {
        let path = format!("/blog/{blog}/post");
        let response = self.http.post_json(&path, request.to_request()).await?;
        Ok(ApiResponse::from_envelope(&response))
    }

    async fn who_am_i(&self) -> Result<UserIdentity> {
        let payload = self.get_response("/user/info", RequestConfig::new()).await?;
        UserIdentity::from_response(&payload)
    }
}

/// Unwrap the `response` object of a successful envelope
fn into_payload(response: JsonResponse) -> Result<Value> {
    let envelope = ApiResponse::from_envelope(&response);
    if !response.is_success() || !envelope.is_success() {
        return Err(Error::api(
            envelope.status.unwrap_or(response.status),
            envelope.failure_message(),
        ));
    }
    Ok(envelope.body)
}
