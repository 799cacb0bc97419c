//! Execution engine module
//!
//! Main pagination loop.
//!
//! # Overview
//!
//! A run repeats fetch → extract → emit until the number of posts fetched
//! reaches the target:
//! - the first fetch is immediate, every later one waits `page_delay`
//! - a failed fetch ends the run with the error
//! - an empty page ends the run normally
//! - after each page the output is flushed, preceded by the new cursor
//!   when the formatter supports it

mod types;

pub use types::{EngineConfig, RunState, RunSummary, DEFAULT_PAGE_DELAY, DEFAULT_TARGET_COUNT};

use crate::api::{DashboardParams, FeedClient};
use crate::error::Result;
use crate::extract::{Deduplicator, ItemExtractor};
use crate::output::OutputFormatter;
use crate::pagination::{Cursor, EmptyPageError, PageFetchStrategy, StartCondition};
use tracing::{debug, info};

/// Walks the dashboard once, emitting each image entry at most once
pub struct PaginationEngine {
    config: EngineConfig,
    strategy: Box<dyn PageFetchStrategy>,
    start: Cursor,
    dedup: Deduplicator,
    extractor: ItemExtractor,
}

impl PaginationEngine {
    /// Create an engine for one run
    pub fn new(config: EngineConfig, start: StartCondition) -> Self {
        let (strategy, cursor) = start.resolve();
        Self::with_strategy(config, strategy, cursor)
    }

    /// Create an engine with an explicit strategy and starting cursor
    pub fn with_strategy(
        config: EngineConfig,
        strategy: Box<dyn PageFetchStrategy>,
        start: Cursor,
    ) -> Self {
        Self {
            config,
            strategy,
            start,
            dedup: Deduplicator::new(),
            extractor: ItemExtractor::new(),
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run to completion. `self_name` is the caller's blog; its posts are
    /// never emitted.
    pub async fn run(
        mut self,
        client: &dyn FeedClient,
        self_name: &str,
        out: &mut dyn OutputFormatter,
    ) -> Result<RunSummary> {
        let mut state = RunState::new(self.config.target_count, self.start);
        let mut summary = RunSummary::default();

        info!(
            strategy = self.strategy.name(),
            cursor = %state.cursor,
            target = state.target_count,
            "Starting dashboard run"
        );

        while state.wants_more() {
            if summary.pages > 0 && !self.config.page_delay.is_zero() {
                debug!("Waiting {:?} before next page", self.config.page_delay);
                tokio::time::sleep(self.config.page_delay).await;
            }

            let params = self.request_for(&state.cursor);
            let page = client.fetch_dashboard(&params).await?;
            summary.pages += 1;
            summary.malformed_posts += page.skipped as u64;

            let next = match self.strategy.next_cursor(&page.posts, &state.cursor) {
                Ok(_) if page.is_empty() => None,
                Ok(cursor) => Some(cursor),
                Err(EmptyPageError) => None,
            };
            let Some(next) = next else {
                info!(cursor = %state.cursor, "Reached an empty page, stopping");
                summary.reached_end = true;
                break;
            };

            let extraction = self
                .extractor
                .extract(&page.posts, self_name, &mut self.dedup);
            debug!(
                page = summary.pages,
                posts = extraction.posts_consumed,
                entries = extraction.entries.len(),
                duplicates = extraction.duplicates,
                "Extracted page"
            );

            for entry in &extraction.entries {
                out.emit(entry)?;
            }

            state.advance(next, extraction.posts_consumed);
            summary.add_page(&extraction);
            summary.final_cursor = Some(state.cursor);

            if self.config.emit_cursor {
                out.emit_cursor(&state.cursor)?;
            }
            out.flush()?;
        }

        info!(
            pages = summary.pages,
            posts = summary.posts_fetched,
            entries = summary.entries_emitted,
            "Completed dashboard run"
        );

        Ok(summary)
    }

    fn request_for(&self, cursor: &Cursor) -> DashboardParams {
        let mut params = DashboardParams::new(self.strategy.next_request(cursor))
            .with_limit(self.config.page_limit);
        if let Some(post_type) = &self.config.post_type {
            params = params.with_type(post_type);
        }
        params
    }
}

impl std::fmt::Debug for PaginationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
