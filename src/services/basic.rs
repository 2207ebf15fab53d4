// src/services/basic.rs

//! Summary-level note listing used when full text is not requested.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FeedItem, NoteSummary, ProfileNotes};
use crate::services::profile::ProfileFetcher;
use crate::services::text::normalize_description;
use crate::storage::{Cache, try_get};
use crate::utils::note_link;

/// Source of a profile and its note summaries, without detail pages.
#[async_trait]
pub trait BasicNotesSource: Send + Sync {
    async fn list_notes(&self, url: &str, cookie: Option<&str>) -> Result<ProfileNotes>;
}

/// Lists notes from the profile page, caching the whole listing by URL.
#[derive(Clone)]
pub struct CachedProfileNotes {
    profiles: ProfileFetcher,
    cache: Arc<dyn Cache>,
}

impl CachedProfileNotes {
    pub fn new(profiles: ProfileFetcher, cache: Arc<dyn Cache>) -> Self {
        Self { profiles, cache }
    }
}

#[async_trait]
impl BasicNotesSource for CachedProfileNotes {
    async fn list_notes(&self, url: &str, cookie: Option<&str>) -> Result<ProfileNotes> {
        try_get(self.cache.as_ref(), url, || self.profiles.fetch(url, cookie)).await
    }
}

/// Feed item for a note summary.
pub fn format_note(profile_url: &str, note: &NoteSummary) -> FeedItem {
    let title = normalize_description(&note.display_title);
    let description = match &note.cover {
        Some(cover) => format!("<img src=\"{cover}\"><br>{title}"),
        None => title.clone(),
    };

    FeedItem {
        title,
        link: note_link(profile_url, &note.note_id),
        description,
        author: note.author.clone(),
        guid: note.note_id.clone(),
        pub_date: None,
    }
}
