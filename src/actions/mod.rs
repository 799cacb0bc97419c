//! Actions module
//!
//! One-shot write operations: reblog a post, or create a photo post from a
//! remote image. A rejected call is reported through the formatter's error
//! sink and the process still exits cleanly; transport errors propagate.

use crate::api::{ApiResponse, FeedClient, PostImageRequest, ReblogTarget, UserIdentity};
use crate::error::Result;
use crate::output::OutputFormatter;
use tracing::{info, warn};

/// Result of a write action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The service accepted the call
    Succeeded(ApiResponse),
    /// The service rejected the call with this message
    Failed(String),
}

impl ActionOutcome {
    /// Check if the action succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Runs write actions on behalf of the authenticated account
pub struct ActionExecutor<'a> {
    client: &'a dyn FeedClient,
    identity: &'a UserIdentity,
}

impl<'a> ActionExecutor<'a> {
    /// Create an executor posting as `identity`
    pub fn new(client: &'a dyn FeedClient, identity: &'a UserIdentity) -> Self {
        Self { client, identity }
    }

    /// Reblog `target` onto the caller's blog
    pub async fn reblog(
        &self,
        target: &ReblogTarget,
        out: &mut dyn OutputFormatter,
    ) -> Result<ActionOutcome> {
        info!(post_id = target.id, "Reblogging post");
        let response = self
            .client
            .reblog(&self.identity.blog_identifier(), target)
            .await?;
        settle(response, out)
    }

    /// Create a photo post from `request.source`
    pub async fn post_image(
        &self,
        request: &PostImageRequest,
        out: &mut dyn OutputFormatter,
    ) -> Result<ActionOutcome> {
        request.validate()?;
        info!(source = %request.source, "Posting image");
        let response = self
            .client
            .post_image(&self.identity.blog_identifier(), request)
            .await?;
        settle(response, out)
    }
}

fn settle(response: ApiResponse, out: &mut dyn OutputFormatter) -> Result<ActionOutcome> {
    if response.is_success() {
        return Ok(ActionOutcome::Succeeded(response));
    }

    let message = response.failure_message();
    warn!(status = ?response.status, "Action rejected: {message}");
    out.emit_error(&message)?;
    out.flush()?;
    Ok(ActionOutcome::Failed(message))
}
