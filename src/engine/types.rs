//! Engine types
//!
//! Configuration, run-local state and statistics for the pagination engine.

use crate::extract::Extraction;
use crate::pagination::Cursor;
use std::time::Duration;

/// Pause between dashboard requests
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(10);

/// Default number of posts to examine
pub const DEFAULT_TARGET_COUNT: u64 = 20;

/// Configuration for a pagination run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Stop once this many posts have been fetched
    pub target_count: u64,
    /// Wait before every fetch except the first
    pub page_delay: Duration,
    /// Page size sent to the API
    pub page_limit: Option<u32>,
    /// Content filter sent to the API
    pub post_type: Option<String>,
    /// Emit the resumable cursor after every page
    pub emit_cursor: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            page_delay: DEFAULT_PAGE_DELAY,
            page_limit: None,
            post_type: Some("photo".to_string()),
            emit_cursor: true,
        }
    }
}

impl EngineConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target post count
    #[must_use]
    pub fn with_target_count(mut self, count: u64) -> Self {
        self.target_count = count;
        self
    }

    /// Set inter-page delay
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set page size
    #[must_use]
    pub fn with_page_limit(mut self, limit: Option<u32>) -> Self {
        self.page_limit = limit;
        self
    }

    /// Set content filter (`None` fetches every post type)
    #[must_use]
    pub fn with_post_type(mut self, post_type: Option<String>) -> Self {
        self.post_type = post_type;
        self
    }

    /// Set whether to emit the cursor after each page
    #[must_use]
    pub fn with_emit_cursor(mut self, enabled: bool) -> Self {
        self.emit_cursor = enabled;
        self
    }
}

/// Mutable state of one run, touched only between fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Posts fetched across all pages
    pub posts_fetched: u64,
    /// Position of the next page
    pub cursor: Cursor,
    /// Posts to examine before stopping
    pub target_count: u64,
}

impl RunState {
    /// Fresh state at `cursor`
    pub fn new(target_count: u64, cursor: Cursor) -> Self {
        Self {
            posts_fetched: 0,
            cursor,
            target_count,
        }
    }

    /// Check if more pages are needed
    pub fn wants_more(&self) -> bool {
        self.posts_fetched < self.target_count
    }

    /// Record a consumed page
    pub fn advance(&mut self, cursor: Cursor, posts: usize) {
        self.cursor = cursor;
        self.posts_fetched += posts as u64;
    }
}

/// Statistics for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages fetched, including a final empty one
    pub pages: u64,
    /// Posts fetched across all pages
    pub posts_fetched: u64,
    /// Entries handed to the formatter
    pub entries_emitted: u64,
    /// Posts skipped as self-authored
    pub self_authored: u64,
    /// Posts skipped as already seen
    pub duplicates: u64,
    /// Images skipped for lacking a URL
    pub malformed_images: u64,
    /// Dashboard records dropped because they could not be decoded
    pub malformed_posts: u64,
    /// Cursor to resume from
    pub final_cursor: Option<Cursor>,
    /// The run ended on an empty page rather than the target count
    pub reached_end: bool,
}

impl RunSummary {
    /// Fold one page's extraction into the totals
    pub fn add_page(&mut self, extraction: &Extraction<'_>) {
        self.posts_fetched += extraction.posts_consumed as u64;
        self.entries_emitted += extraction.entries.len() as u64;
        self.self_authored += extraction.self_authored as u64;
        self.duplicates += extraction.duplicates as u64;
        self.malformed_images += extraction.malformed_images as u64;
    }
}
