// src/services/profile.rs

//! Profile page fetching.

use std::sync::Arc;

use crate::error::Result;
use crate::models::ProfileNotes;
use crate::services::state::extract_state;
use crate::utils::http::PageFetcher;

/// Fetches a profile page and reads profile metadata and note cards from it.
#[derive(Clone)]
pub struct ProfileFetcher {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProfileFetcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and return the profile with its flattened notes.
    pub async fn fetch(&self, url: &str, cookie: Option<&str>) -> Result<ProfileNotes> {
        let html = self.fetcher.fetch_text(url, cookie).await?;
        let user = extract_state(&html)?.user()?;
        let profile_notes = ProfileNotes::from(user);

        log::info!(
            "Profile {} ({}): {} notes",
            profile_notes.profile.nickname,
            url,
            profile_notes.notes.len()
        );
        Ok(profile_notes)
    }
}
