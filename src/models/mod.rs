// src/models/mod.rs

//! Domain models for the feed builder.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod feed;
mod note;
mod profile;

use serde::{Deserialize, Deserializer};

// Re-export all public types
pub use config::{
    COOKIE_ENV, CacheConfig, Config, CrawlerConfig, LoggingConfig, XiaohongshuConfig,
};
pub use feed::{FEED_TITLE_SUFFIX, Feed, FeedItem};
pub use note::{CachedNote, DetailMode, NoteDetail, NoteImage};
pub use profile::{NoteSummary, Profile, ProfileNotes, UserState, flatten_notes};

/// Deserialize `null` (the page's `undefined`) as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
