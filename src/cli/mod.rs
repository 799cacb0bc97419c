//! CLI module
//!
//! A single command whose flags pick the action:
//!
//! - default - walk the dashboard and print image entries
//! - `--reblog ID/KEY` - reblog one post
//! - `--post-image SOURCE` - create a photo post

mod commands;
mod runner;

pub use commands::{Action, Cli};
pub use runner::Runner;
