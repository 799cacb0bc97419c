//! Common types used throughout dashreel
//!
//! Posts as they come off the dashboard, the images they carry, and the
//! flattened entries handed to output formatters.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Type Aliases
// ============================================================================

/// Dashboard post identifier. Ids grow over time, so a smaller id is older.
pub type PostId = u64;

// ============================================================================
// Post
// ============================================================================

/// A dashboard post with the fields this crate consumes.
///
/// The complete record is kept in `raw` so dump output can show everything
/// the API returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Stable identity across fetches
    pub id: PostId,
    /// Blog the post appears on
    pub blog_name: String,
    /// Key required to reblog this post
    pub reblog_key: String,
    /// Notes (likes + reblogs + replies)
    pub note_count: u64,
    /// Images in display order
    pub images: Vec<Image>,
    /// Original record
    #[serde(skip)]
    pub raw: Value,
}

/// One image inside a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Position within the post's image sequence (0-origin)
    pub index: usize,
    /// Original-resolution URL, `None` when the record lacks one
    pub url: Option<String>,
}

/// Fields read from a raw post. Only `id` is required; anything else that
/// is null or of the wrong shape falls back to a default.
#[derive(Deserialize)]
struct PostRecord {
    #[serde(deserialize_with = "deserialize_id")]
    id: PostId,
    #[serde(default, deserialize_with = "lenient")]
    blog_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    reblog_key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    note_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    photos: Option<Vec<Value>>,
}

/// Decode `T`, yielding `None` for null or mistyped values
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `photo.original_size.url`, when it is a non-empty string
fn original_url(photo: &Value) -> Option<String> {
    photo
        .pointer("/original_size/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from)
}

/// Accept ids as JSON numbers or as decimal strings
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<PostId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

impl Post {
    /// Parse a post from its raw API record
    pub fn from_value(raw: Value) -> Result<Self> {
        let record: PostRecord = serde_json::from_value(raw.clone())
            .map_err(|e| Error::decode(format!("Malformed post record: {e}")))?;

        let images = record
            .photos
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, photo)| Image {
                index,
                url: original_url(photo),
            })
            .collect();

        Ok(Self {
            id: record.id,
            blog_name: record.blog_name.unwrap_or_default(),
            reblog_key: record.reblog_key.unwrap_or_default(),
            note_count: record.note_count.unwrap_or_default(),
            images,
            raw,
        })
    }

    /// Check if the post was made by the given blog
    pub fn is_authored_by(&self, blog_name: &str) -> bool {
        self.blog_name == blog_name
    }
}

// ============================================================================
// Entry
// ============================================================================

/// One emittable unit: an image URL together with its owning post
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    /// Original-resolution image URL
    pub url: &'a str,
    /// Post the image belongs to
    pub post: &'a Post,
    /// Image position within the post
    pub index: usize,
}

impl<'a> Entry<'a> {
    /// Create a new entry
    pub fn new(url: &'a str, post: &'a Post, index: usize) -> Self {
        Self { url, post, index }
    }

    /// Identity of this entry within a run
    pub fn key(&self) -> (PostId, usize) {
        (self.post.id, self.index)
    }
}
