//! CLI arguments and parsing

use crate::api::{PostImageRequest, ReblogTarget};
use crate::output::OutputFormat;
use crate::pagination::{PaginationMode, StartCondition};
use crate::types::PostId;
use clap::Parser;
use std::path::PathBuf;

/// Walk the dashboard and print its images, or reblog and post images
#[derive(Parser, Debug)]
#[command(name = "dashreel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of dashboard posts to examine
    #[arg(short = 'n', long, default_value_t = crate::engine::DEFAULT_TARGET_COUNT)]
    pub count: u64,

    /// Starting offset into the dashboard
    #[arg(long)]
    pub offset: Option<u64>,

    /// Start below this post id (overrides --offset)
    #[arg(long)]
    pub before_id: Option<PostId>,

    /// Pagination strategy
    #[arg(long, value_enum, default_value_t = PaginationMode::Cursor)]
    pub pagination: PaginationMode,

    /// Reblog a post given as ID/REBLOG_KEY
    #[arg(
        long,
        value_name = "ID/KEY",
        value_parser = parse_reblog_target,
        conflicts_with = "post_image"
    )]
    pub reblog: Option<ReblogTarget>,

    /// Create a photo post from this image URL
    #[arg(long, value_name = "SOURCE")]
    pub post_image: Option<String>,

    /// Caption for --post-image
    #[arg(long, requires = "post_image")]
    pub caption: Option<String>,

    /// Click-through link for --post-image
    #[arg(long, requires = "post_image")]
    pub link: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    pub format: OutputFormat,

    /// Credential file (JSON)
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds to wait between page fetches
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Posts requested per page (1-20)
    #[arg(long, value_name = "N")]
    pub page_limit: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Walk the dashboard
    Paginate(StartCondition),
    /// Reblog one post
    Reblog(ReblogTarget),
    /// Create one photo post
    PostImage(PostImageRequest),
}

impl Cli {
    /// Resolve flags into the action to run
    pub fn action(&self) -> Action {
        if let Some(target) = &self.reblog {
            return Action::Reblog(target.clone());
        }
        if let Some(source) = &self.post_image {
            return Action::PostImage(
                PostImageRequest::new(source)
                    .with_caption(self.caption.clone())
                    .with_link(self.link.clone()),
            );
        }

        let mut start = StartCondition::new(self.pagination);
        if let Some(offset) = self.offset {
            start = start.with_offset(offset);
        }
        if let Some(before_id) = self.before_id {
            start = start.with_before_id(before_id);
        }
        Action::Paginate(start)
    }
}

fn parse_reblog_target(value: &str) -> std::result::Result<ReblogTarget, String> {
    value.parse().map_err(|e: crate::error::Error| e.to_string())
}
