//! Page flattening
//!
//! Turns a page of posts into the ordered entries a formatter receives.

use super::dedup::Deduplicator;
use crate::types::{Entry, Post};
use tracing::warn;

/// Result of flattening one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction<'a> {
    /// Entries in post arrival order, then image order
    pub entries: Vec<Entry<'a>>,
    /// Posts examined, including skipped ones; drives cursor bookkeeping
    pub posts_consumed: usize,
    /// Posts dropped because the caller authored them
    pub self_authored: usize,
    /// Posts dropped because an earlier page already produced them
    pub duplicates: usize,
    /// Images dropped because they had no original-size URL
    pub malformed_images: usize,
}

/// Flattens posts into entries, skipping self-authored and repeated posts
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemExtractor;

impl ItemExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract entries from `posts`.
    ///
    /// Self-authored posts are dropped before the duplicate check so their
    /// ids are never recorded as seen. An image without a URL is skipped on
    /// its own; the post's other images keep their original index.
    pub fn extract<'a>(
        &self,
        posts: &'a [Post],
        self_name: &str,
        dedup: &mut Deduplicator,
    ) -> Extraction<'a> {
        let mut extraction = Extraction {
            posts_consumed: posts.len(),
            ..Default::default()
        };

        for post in posts {
            if post.is_authored_by(self_name) {
                extraction.self_authored += 1;
                continue;
            }

            if !dedup.is_new(post.id) {
                extraction.duplicates += 1;
                continue;
            }

            for image in &post.images {
                match image.url.as_deref() {
                    Some(url) => extraction.entries.push(Entry::new(url, post, image.index)),
                    None => {
                        warn!(
                            post_id = post.id,
                            index = image.index,
                            "Skipping image without original-size URL"
                        );
                        extraction.malformed_images += 1;
                    }
                }
            }
        }

        extraction
    }
}
