// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # dashreel
//!
//! Walks a Tumblr dashboard exactly once per post, printing every image it
//! finds, and performs one-shot reblog and photo-post actions.
//!
//! ## Features
//!
//! - **Two pagination strategies**: positional offsets or stable before-id cursors
//! - **Deduplication**: posts repeated by a shifting feed are emitted once
//! - **Incremental output**: each page is flushed before the next fetch
//! - **Resumable**: the final cursor is emitted for the next invocation
//! - **Three output formats**: plain URLs, command lines, YAML dumps
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashreel::api::{FeedClient, TumblrClient};
//! use dashreel::engine::{EngineConfig, PaginationEngine};
//! use dashreel::output::SimpleFormatter;
//! use dashreel::pagination::{PaginationMode, StartCondition};
//!
//! let client = TumblrClient::new(http);
//! let me = client.who_am_i().await?;
//! let engine = PaginationEngine::new(
//!     EngineConfig::new().with_target_count(100),
//!     StartCondition::new(PaginationMode::Cursor),
//! );
//! let mut out = SimpleFormatter::new(std::io::stdout());
//! let summary = engine.run(&client, &me.name, &mut out).await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      CLI / Runner                        │
//! └───────────────┬──────────────────────────┬───────────────┘
//!                 │                          │
//! ┌───────────────┴──────────┐   ┌───────────┴───────────────┐
//! │    PaginationEngine      │   │     ActionExecutor        │
//! │ Strategy │ Extract/Dedup │   │   reblog │ post_image     │
//! └──────┬───────────┬───────┘   └───────────┬───────────────┘
//!        │           │                       │
//! ┌──────┴───────────┴───────────────────────┴───────────────┐
//! │  FeedClient (Tumblr v2)  │  OutputFormatter              │
//! │  HTTP + OAuth 1.0a       │  simple │ structured │ dump   │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Posts, images and entries
pub mod types;

/// Credentials and OAuth 1.0a signing
pub mod auth;

/// HTTP client
pub mod http;

/// Remote feed API
pub mod api;

/// Pagination strategies and cursors
pub mod pagination;

/// Entry extraction and deduplication
pub mod extract;

/// Pagination engine
pub mod engine;

/// Entry, cursor and error formatters
pub mod output;

/// Reblog and post-image actions
pub mod actions;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::{FeedClient, TumblrClient};
pub use engine::{EngineConfig, PaginationEngine, RunSummary};
pub use pagination::{Cursor, PaginationMode, StartCondition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
