// src/models/note.rs

//! Note detail structures read from a note's detail page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Note body at `note.noteDetailMap[firstNoteId].note`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image_list: Vec<NoteImage>,

    /// Publish time in epoch milliseconds
    pub time: i64,
}

impl NoteDetail {
    /// Image references in display order.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.image_list.iter().map(|image| image.url_default.as_str())
    }

    /// Publish time as a UTC timestamp.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteImage {
    pub url_default: String,
}

/// How much of a note goes into the rendered description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    /// Image tags only
    ImagesOnly,
    /// Image tags, title and cleaned body text
    FullText,
}

/// Enriched note as stored in the cache, keyed by note link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedNote {
    pub title: String,
    pub description: String,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<DateTime<Utc>>,
}
