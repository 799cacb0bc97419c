//! Extraction module
//!
//! Flattens fetched pages into image entries and suppresses posts that
//! reappear when the live feed shifts under an offset walk.

mod dedup;
mod extractor;

pub use dedup::Deduplicator;
pub use extractor::{Extraction, ItemExtractor};
