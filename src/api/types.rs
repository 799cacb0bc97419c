//! Request and response types for the dashboard API

use crate::error::{Error, Result};
use crate::http::{JsonResponse, RequestConfig};
use crate::pagination::PageAnchor;
use crate::types::{Post, PostId};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;
use url::Url;

// ============================================================================
// Dashboard
// ============================================================================

/// Parameters for one dashboard fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardParams {
    /// Content filter (e.g. "photo")
    pub post_type: Option<String>,
    /// Maximum page size
    pub limit: Option<u32>,
    /// Position in the feed
    pub anchor: PageAnchor,
}

impl DashboardParams {
    /// Parameters for the page at `anchor`
    pub fn new(anchor: PageAnchor) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// Set the content filter
    #[must_use]
    pub fn with_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = Some(post_type.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Convert into request query parameters
    pub fn to_request(&self) -> RequestConfig {
        let mut config = RequestConfig::new();
        if let Some(post_type) = &self.post_type {
            config = config.query("type", post_type);
        }
        if let Some(limit) = self.limit {
            config = config.query("limit", limit.to_string());
        }
        match self.anchor {
            PageAnchor::Start => config,
            PageAnchor::Offset(offset) => config.query("offset", offset.to_string()),
            PageAnchor::BeforeId(id) => config.query("before_id", id.to_string()),
        }
    }
}

/// One fetched page of posts, in feed order (newest first)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Posts in the page
    pub posts: Vec<Post>,
    /// Records dropped because they could not be decoded as posts
    pub skipped: usize,
}

impl Page {
    /// Create a page from parsed posts
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts, skipped: 0 }
    }

    /// Parse the `response` object of a dashboard call.
    ///
    /// A record that cannot be decoded as a post is skipped with a warning
    /// and counted in `skipped`. Skipped records are not part of `posts`, so
    /// they neither advance an offset cursor nor anchor a before-id cursor.
    pub fn from_response(response: &Value) -> Result<Self> {
        let records = response
            .get("posts")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::decode("Dashboard response has no 'posts' array"))?;

        let mut page = Self::default();
        for record in records {
            match Post::from_value(record.clone()) {
                Ok(post) => page.posts.push(post),
                Err(e) => {
                    warn!("Skipping dashboard record: {e}");
                    page.skipped += 1;
                }
            }
        }

        Ok(page)
    }

    /// Number of posts in the page
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if the page is empty
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

// ============================================================================
// Identity
// ============================================================================

/// The authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserIdentity {
    /// Account name; also the name of the primary blog
    pub name: String,
}

impl UserIdentity {
    /// Create an identity for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Parse the `response` object of a user-info call
    pub fn from_response(response: &Value) -> Result<Self> {
        let user = response
            .get("user")
            .ok_or_else(|| Error::decode("User info response has no 'user' object"))?;
        let name = user
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::decode("User info response has no user name"))?;

        Ok(Self::new(name))
    }

    /// Blog identifier used in write endpoints
    pub fn blog_identifier(&self) -> String {
        if self.name.contains('.') {
            self.name.clone()
        } else {
            format!("{}.tumblr.com", self.name)
        }
    }
}

// ============================================================================
// Write actions
// ============================================================================

/// Post to reblog, written on the command line as `ID/REBLOG_KEY`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReblogTarget {
    /// Post id
    pub id: PostId,
    /// Reblog key of the post
    pub reblog_key: String,
}

impl ReblogTarget {
    /// Create a reblog target
    pub fn new(id: PostId, reblog_key: impl Into<String>) -> Self {
        Self {
            id,
            reblog_key: reblog_key.into(),
        }
    }

    /// Form parameters for the reblog endpoint
    pub fn to_request(&self) -> RequestConfig {
        RequestConfig::new()
            .form("id", self.id.to_string())
            .form("reblog_key", &self.reblog_key)
    }
}

impl FromStr for ReblogTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, key) = s
            .split_once('/')
            .ok_or_else(|| Error::invalid_argument("reblog", "expected ID/REBLOG_KEY"))?;
        let id = id
            .trim()
            .parse()
            .map_err(|e| Error::invalid_argument("reblog", format!("bad post id '{id}': {e}")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument("reblog", "reblog key is empty"));
        }
        Ok(Self::new(id, key))
    }
}

/// Photo post created from a remote image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostImageRequest {
    /// Image URL to post
    pub source: String,
    /// Click-through link
    pub link: Option<String>,
    /// Caption (HTML allowed)
    pub caption: Option<String>,
}

impl PostImageRequest {
    /// Create a request for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Set the click-through link
    #[must_use]
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    /// Set the caption
    #[must_use]
    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }

    /// Check that `source` is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.source.trim())
            .map_err(|e| Error::invalid_argument("post_image", format!("not a URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_argument(
                "post_image",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }

    /// Form parameters for the post endpoint
    pub fn to_request(&self) -> RequestConfig {
        let mut config = RequestConfig::new()
            .form("type", "photo")
            .form("source", &self.source);
        if let Some(link) = &self.link {
            config = config.form("link", link);
        }
        if let Some(caption) = &self.caption {
            config = config.form("caption", caption);
        }
        config
    }
}

// ============================================================================
// ApiResponse
// ============================================================================

/// Outcome of a write call.
///
/// Successful calls carry the `response` object and no status. Failed
/// calls carry the status, message and errors from the envelope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResponse {
    /// Status code, present on failure
    pub status: Option<u16>,
    /// Status message
    pub msg: Option<String>,
    /// Error descriptions
    pub errors: Vec<String>,
    /// Response payload
    pub body: Value,
}

impl ApiResponse {
    /// Success response wrapping `body`
    pub fn ok(body: Value) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    /// Build from an API envelope (`meta` / `response` / `errors`)
    pub fn from_envelope(response: &JsonResponse) -> Self {
        let body = &response.body;
        let payload = body.get("response").cloned().unwrap_or(Value::Null);

        if response.is_success() {
            return Self::ok(payload);
        }

        let meta = body.get("meta");
        let status = meta
            .and_then(|m| m.get("status"))
            .and_then(Value::as_u64)
            .map_or(response.status, |s| s as u16);
        let msg = meta
            .and_then(|m| m.get("msg"))
            .and_then(Value::as_str)
            .map(String::from);

        let mut errors = collect_errors(body.get("errors"));
        if errors.is_empty() {
            errors = collect_errors(payload.get("errors"));
        }

        Self {
            status: Some(status),
            msg,
            errors,
            body: payload,
        }
    }

    /// Build from an already flattened object such as
    /// `{"status": 403, "errors": ["blocked"]}`
    pub fn from_value(value: Value) -> Self {
        Self {
            status: value
                .get("status")
                .and_then(Value::as_u64)
                .map(|s| s as u16),
            msg: value.get("msg").and_then(Value::as_str).map(String::from),
            errors: collect_errors(value.get("errors")),
            body: value,
        }
    }

    /// A status other than 200 means the call failed
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |status| status == 200)
    }

    /// Human readable failure description
    pub fn failure_message(&self) -> String {
        if !self.errors.is_empty() {
            return self.errors.join("; ");
        }
        if let Some(msg) = self.msg.as_deref().filter(|m| !m.is_empty()) {
            return msg.to_string();
        }
        match self.status {
            Some(status) => format!("status {status}"),
            None => "unknown error".to_string(),
        }
    }
}

/// Errors may be plain strings or objects with `detail` / `title` / `message`
fn collect_errors(errors: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = errors else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => ["detail", "title", "message"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(String::from),
            _ => None,
        })
        .collect()
}
