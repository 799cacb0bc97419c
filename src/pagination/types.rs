//! Pagination types and traits
//!
//! Defines the cursor model and the strategy abstraction shared by the
//! offset and before-id walkers.

use crate::types::{Post, PostId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resumable position in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Number of posts from the newest end of the feed (origin 0)
    Offset(u64),
    /// Id of the last post seen; the next page holds strictly older posts
    BeforeId(PostId),
}

impl Cursor {
    /// Name used when the cursor is handed to a downstream consumer
    pub fn name(&self) -> &'static str {
        match self {
            Self::Offset(_) => "offset",
            Self::BeforeId(_) => "before_id",
        }
    }

    /// Raw value of the cursor
    pub fn value(&self) -> u64 {
        match self {
            Self::Offset(n) | Self::BeforeId(n) => *n,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::Offset(0)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name(), self.value())
    }
}

/// Where the next dashboard request starts. `offset` and `before_id` are
/// never sent together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageAnchor {
    /// Newest posts, no positional parameter
    #[default]
    Start,
    /// Positional `offset` parameter
    Offset(u64),
    /// `before_id` parameter
    BeforeId(PostId),
}

/// Raised when a strategy has to anchor on the last post of an empty page.
/// Callers treat it as the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page contained no posts to anchor the next request on")]
pub struct EmptyPageError;

/// Which walker governs a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Positional offsets for every page
    Offset,
    /// Optional starting offset, then before-id anchoring
    #[default]
    Cursor,
}

/// Core trait for page fetch strategies
pub trait PageFetchStrategy: Send + Sync {
    /// Request position for the page at `cursor`
    fn next_request(&self, cursor: &Cursor) -> PageAnchor;

    /// Cursor after consuming `posts`, fetched from `previous`
    fn next_cursor(
        &self,
        posts: &[Post],
        previous: &Cursor,
    ) -> std::result::Result<Cursor, EmptyPageError>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// How a run starts: the caller's starting position and preferred walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartCondition {
    /// Starting offset
    pub offset: Option<u64>,
    /// Starting before-id anchor
    pub before_id: Option<PostId>,
    /// Preferred walker
    pub mode: PaginationMode,
}

impl StartCondition {
    /// Start from the newest post with the given walker
    pub fn new(mode: PaginationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the starting offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the starting before-id anchor
    #[must_use]
    pub fn with_before_id(mut self, before_id: PostId) -> Self {
        self.before_id = Some(before_id);
        self
    }
}
