//! Per-run duplicate suppression

use crate::types::PostId;
use std::collections::HashSet;

/// Tracks post ids already handed out during one run.
///
/// Grows with the run and is dropped with it; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    seen: HashSet<PostId>,
}

impl Deduplicator {
    /// Create an empty deduplicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `id` is observed and marks it seen
    pub fn is_new(&mut self, id: PostId) -> bool {
        self.seen.insert(id)
    }

    /// Number of distinct ids seen
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing has been seen yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
