// src/models/profile.rs

//! Profile and note summary structures read from a user's profile page.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// The `user` subtree of a profile page's embedded state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub user_page_data: UserPageData,

    /// Note cards, grouped the way the page renders them
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<Vec<NoteCardEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPageData {
    pub basic_info: Profile,
}

/// Profile metadata (`userPageData.basicInfo`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub nickname: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,

    /// Large avatar
    #[serde(default)]
    pub imageb: Option<String>,

    /// Small avatar
    #[serde(default)]
    pub images: Option<String>,
}

impl Profile {
    /// Avatar reference, preferring the large variant.
    pub fn avatar(&self) -> String {
        self.imageb
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.images.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// One element of a note group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCardEntry {
    pub note_card: NoteCard,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCard {
    pub note_id: String,

    pub user: CardUser,

    #[serde(default)]
    pub display_title: Option<String>,

    #[serde(default)]
    pub cover: Option<CardImage>,
}

/// Card author. Pages have shipped both spellings, sometimes together.
#[derive(Debug, Clone, Deserialize)]
pub struct CardUser {
    #[serde(default, rename = "nickName")]
    pub nick_name: Option<String>,

    #[serde(default)]
    pub nickname: Option<String>,
}

impl CardUser {
    pub fn display_name(&self) -> String {
        self.nick_name
            .as_ref()
            .or(self.nickname.as_ref())
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    #[serde(default)]
    pub url_default: Option<String>,
}

/// A flattened note summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteSummary {
    pub note_id: String,
    pub author: String,
    pub display_title: String,
    pub cover: Option<String>,
}

impl From<NoteCard> for NoteSummary {
    fn from(card: NoteCard) -> Self {
        Self {
            note_id: card.note_id,
            author: card.user.display_name(),
            display_title: card.display_title.unwrap_or_default(),
            cover: card.cover.and_then(|c| c.url_default),
        }
    }
}

/// Flatten grouped note cards into one ordered list.
pub fn flatten_notes(groups: Vec<Vec<NoteCardEntry>>) -> Vec<NoteSummary> {
    groups
        .into_iter()
        .flatten()
        .map(|entry| NoteSummary::from(entry.note_card))
        .collect()
}

/// Profile metadata together with the flattened note summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileNotes {
    pub profile: Profile,
    pub notes: Vec<NoteSummary>,
}

impl From<UserState> for ProfileNotes {
    fn from(user: UserState) -> Self {
        Self {
            profile: user.user_page_data.basic_info,
            notes: flatten_notes(user.notes),
        }
    }
}
