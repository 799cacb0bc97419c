//! Page fetch strategy implementations
//!
//! Each strategy handles one way of walking the dashboard.

use super::types::{
    Cursor, EmptyPageError, PageAnchor, PageFetchStrategy, PaginationMode, StartCondition,
};
use crate::types::Post;
use tracing::warn;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination
///
/// Requests `?offset=N` and advances by the number of posts fetched.
/// Posts inserted at the top of the feed during a run shift the window,
/// so pages may overlap or skip; the deduplicator absorbs the overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetStrategy;

impl PageFetchStrategy for OffsetStrategy {
    fn next_request(&self, cursor: &Cursor) -> PageAnchor {
        match cursor {
            Cursor::Offset(offset) => PageAnchor::Offset(*offset),
            // An offset run never produces this cursor
            Cursor::BeforeId(id) => PageAnchor::BeforeId(*id),
        }
    }

    fn next_cursor(
        &self,
        posts: &[Post],
        previous: &Cursor,
    ) -> std::result::Result<Cursor, EmptyPageError> {
        let offset = match previous {
            Cursor::Offset(offset) => *offset,
            Cursor::BeforeId(_) => 0,
        };
        Ok(Cursor::Offset(offset + posts.len() as u64))
    }

    fn name(&self) -> &'static str {
        "offset"
    }
}

// ============================================================================
// Cursor (before-id) Pagination
// ============================================================================

/// Before-id pagination
///
/// Anchors each request on the id of the last post seen, which stays
/// correct when new posts arrive at the top of the feed. A starting offset
/// is honoured for the first request only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorStrategy;

impl PageFetchStrategy for CursorStrategy {
    fn next_request(&self, cursor: &Cursor) -> PageAnchor {
        match cursor {
            Cursor::BeforeId(id) => PageAnchor::BeforeId(*id),
            Cursor::Offset(0) => PageAnchor::Start,
            Cursor::Offset(offset) => PageAnchor::Offset(*offset),
        }
    }

    fn next_cursor(
        &self,
        posts: &[Post],
        _previous: &Cursor,
    ) -> std::result::Result<Cursor, EmptyPageError> {
        posts
            .last()
            .map(|post| Cursor::BeforeId(post.id))
            .ok_or(EmptyPageError)
    }

    fn name(&self) -> &'static str {
        "before_id"
    }
}

// ============================================================================
// Strategy selection
// ============================================================================

impl StartCondition {
    /// Pick the strategy and initial cursor for a run.
    ///
    /// A starting before-id always selects before-id pagination and wins
    /// over a starting offset. Otherwise the mode decides, starting at the
    /// given offset (0 if none).
    pub fn resolve(&self) -> (Box<dyn PageFetchStrategy>, Cursor) {
        if let Some(before_id) = self.before_id {
            if let Some(offset) = self.offset {
                warn!("Ignoring offset {offset}: before_id {before_id} takes precedence");
            }
            return (Box::new(CursorStrategy), Cursor::BeforeId(before_id));
        }

        let start = Cursor::Offset(self.offset.unwrap_or(0));
        match self.mode {
            PaginationMode::Offset => (Box::new(OffsetStrategy), start),
            PaginationMode::Cursor => (Box::new(CursorStrategy), start),
        }
    }
}
