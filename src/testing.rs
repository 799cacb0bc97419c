//! In-memory feed used by unit tests

use crate::api::{
    ApiResponse, DashboardParams, FeedClient, Page, PostImageRequest, ReblogTarget, UserIdentity,
};
use crate::error::{Error, Result};
use crate::pagination::PageAnchor;
use crate::types::{Post, PostId};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Build a post with one image per URL
pub fn post(id: PostId, blog: &str, urls: &[&str]) -> Post {
    let photos: Vec<Value> = urls
        .iter()
        .map(|u| json!({"original_size": {"url": u}}))
        .collect();
    Post::from_value(json!({
        "id": id,
        "blog_name": blog,
        "reblog_key": format!("rk{id}"),
        "note_count": 0,
        "photos": photos
    }))
    .unwrap()
}

/// Posts `ids` by blog `blog`, one image each named `img<id>`
pub fn posts(ids: impl IntoIterator<Item = PostId>, blog: &str) -> Vec<Post> {
    ids.into_iter()
        .map(|id| post(id, blog, &[format!("img{id}").as_str()]))
        .collect()
}

/// A live feed held in memory, newest post first.
///
/// Answers offset and before-id requests the way the remote service does
/// and can insert posts at the top after a given fetch to mimic activity
/// during a run.
pub struct MemoryFeed {
    posts: Mutex<Vec<Post>>,
    page_size: usize,
    identity: UserIdentity,
    arrivals: Mutex<VecDeque<(usize, Vec<Post>)>>,
    fail_at: Option<usize>,
    requests: Mutex<Vec<DashboardParams>>,
    writes: Mutex<Vec<String>>,
    write_response: Option<Value>,
}

impl MemoryFeed {
    pub fn new(posts: Vec<Post>, page_size: usize) -> Self {
        Self {
            posts: Mutex::new(posts),
            page_size,
            identity: UserIdentity::new("me"),
            arrivals: Mutex::new(VecDeque::new()),
            fail_at: None,
            requests: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            write_response: None,
        }
    }

    /// After fetch number `after` (1-based), put `posts` on top of the feed
    #[must_use]
    pub fn with_arrival(self, after: usize, posts: Vec<Post>) -> Self {
        self.arrivals.lock().unwrap().push_back((after, posts));
        self
    }

    /// Fail fetch number `at` (1-based)
    #[must_use]
    pub fn failing_at(mut self, at: usize) -> Self {
        self.fail_at = Some(at);
        self
    }

    /// Answer write calls with this flattened response
    #[must_use]
    pub fn with_write_response(mut self, response: Value) -> Self {
        self.write_response = Some(response);
        self
    }

    pub fn requests(&self) -> Vec<DashboardParams> {
        self.requests.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    fn write_result(&self) -> ApiResponse {
        match &self.write_response {
            Some(response) => ApiResponse::from_value(response.clone()),
            None => ApiResponse::ok(json!({"id": 1})),
        }
    }
}

#[async_trait]
impl FeedClient for MemoryFeed {
    async fn fetch_dashboard(&self, params: &DashboardParams) -> Result<Page> {
        let fetch_number = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(params.clone());
            requests.len()
        };

        if self.fail_at == Some(fetch_number) {
            return Err(Error::api(503, "Service Unavailable"));
        }

        let limit = params.limit.map_or(self.page_size, |l| l as usize);
        let page: Vec<Post> = {
            let posts = self.posts.lock().unwrap();
            match params.anchor {
                PageAnchor::Start => posts.iter().take(limit).cloned().collect(),
                PageAnchor::Offset(offset) => posts
                    .iter()
                    .skip(offset as usize)
                    .take(limit)
                    .cloned()
                    .collect(),
                PageAnchor::BeforeId(id) => posts
                    .iter()
                    .filter(|p| p.id < id)
                    .take(limit)
                    .cloned()
                    .collect(),
            }
        };

        let mut arrivals = self.arrivals.lock().unwrap();
        while arrivals.front().is_some_and(|(after, _)| *after == fetch_number) {
            if let Some((_, mut new_posts)) = arrivals.pop_front() {
                let mut posts = self.posts.lock().unwrap();
                new_posts.extend(posts.drain(..));
                *posts = new_posts;
            }
        }

        Ok(Page::new(page))
    }

    async fn reblog(&self, blog: &str, target: &ReblogTarget) -> Result<ApiResponse> {
        self.writes
            .lock()
            .unwrap()
            .push(format!("reblog {blog} {}/{}", target.id, target.reblog_key));
        Ok(self.write_result())
    }

    async fn post_image(&self, blog: &str, request: &PostImageRequest) -> Result<ApiResponse> {
        self.writes
            .lock()
            .unwrap()
            .push(format!("post {blog} {}", request.source));
        Ok(self.write_result())
    }

    async fn who_am_i(&self) -> Result<UserIdentity> {
        Ok(self.identity.clone())
    }
}
