//! Dashboard API module
//!
//! Request/response types for the remote service and the `FeedClient`
//! trait through which everything else reaches it.

mod client;
mod types;

pub use client::{FeedClient, TumblrClient};
pub use types::{ApiResponse, DashboardParams, Page, PostImageRequest, ReblogTarget, UserIdentity};
