//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Base URL of user profile pages.
pub const PROFILE_BASE_URL: &str = "https://www.xiaohongshu.com/user/profile/";

/// Profile page URL for a user id.
///
/// The id is opaque and becomes a single percent-encoded path segment.
pub fn profile_url(user_id: &str) -> Result<String> {
    if matches!(user_id, "" | "." | "..") {
        return Err(AppError::validation(format!("invalid user id '{user_id}'")));
    }

    let mut url = Url::parse(PROFILE_BASE_URL)?;
    url.path_segments_mut()
        .map_err(|_| AppError::validation("profile base URL cannot take path segments"))?
        .pop_if_empty()
        .push(user_id);
    Ok(url.to_string())
}

/// Detail page link for a note listed on a profile page.
pub fn note_link(profile_url: &str, note_id: &str) -> String {
    format!("{}/{}", profile_url.trim_end_matches('/'), note_id)
}
