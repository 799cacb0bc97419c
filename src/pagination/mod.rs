//! Pagination module
//!
//! Supports: Offset, Before-id (cursor)
//!
//! # Overview
//!
//! A run walks the dashboard with exactly one cursor kind. Strategies turn
//! the current cursor into request parameters and compute the next cursor
//! from the page just fetched.

mod strategies;
mod types;

pub use strategies::{CursorStrategy, OffsetStrategy};
pub use types::{
    Cursor, EmptyPageError, PageAnchor, PageFetchStrategy, PaginationMode, StartCondition,
};
