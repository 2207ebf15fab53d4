// src/services/notes.rs

//! Note detail enrichment.
//!
//! Fetches a note's detail page and renders its images and text into a feed
//! description. Results are cached by note link.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{CachedNote, DetailMode, NoteDetail};
use crate::services::state::extract_state;
use crate::services::text::normalize_description;
use crate::storage::{Cache, try_get};
use crate::utils::http::PageFetcher;

/// Service for enriching notes with their full detail.
#[derive(Clone)]
pub struct NoteEnricher {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn Cache>,
}

impl NoteEnricher {
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache: Arc<dyn Cache>) -> Self {
        Self { fetcher, cache }
    }

    /// Cached or freshly fetched detail for the note at `link`.
    ///
    /// The cache key is the link alone, so an entry rendered in one mode is
    /// served for the other until it expires.
    pub async fn enrich(
        &self,
        link: &str,
        cookie: Option<&str>,
        mode: DetailMode,
    ) -> Result<CachedNote> {
        try_get(self.cache.as_ref(), link, || self.fetch_note(link, cookie, mode)).await
    }

    async fn fetch_note(
        &self,
        link: &str,
        cookie: Option<&str>,
        mode: DetailMode,
    ) -> Result<CachedNote> {
        log::debug!("Fetching note detail {}", link);
        let html = self.fetcher.fetch_text(link, cookie).await?;
        let detail = extract_state(&html)?.note_detail()?;
        Ok(render_note(&detail, mode))
    }
}

/// Render a note detail into its cached form.
pub fn render_note(detail: &NoteDetail, mode: DetailMode) -> CachedNote {
    let images: String = detail
        .image_urls()
        .map(|url| format!("<img src=\"{url}\">"))
        .collect();

    let description = match mode {
        DetailMode::ImagesOnly => images,
        DetailMode::FullText => format!(
            "{images}<br>{}<br>{}",
            detail.title,
            normalize_description(&detail.desc)
        ),
    };

    CachedNote {
        title: detail.title.clone(),
        description,
        pub_date: detail.published_at(),
    }
}
