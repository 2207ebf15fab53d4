// src/models/feed.rs

//! Feed payload handed to the syndication layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title suffix the platform uses for note listings.
pub const FEED_TITLE_SUFFIX: &str = "笔记 • 小红书 / RED";

/// A single feed entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Rendered HTML fragment
    pub description: String,
    pub author: String,
    /// Note id, stable across runs
    pub guid: String,
    #[serde(rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
}

/// Feed envelope: channel metadata plus items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub item: Vec<FeedItem>,
}

impl Feed {
    /// Channel title for a user's notes.
    pub fn title_for(nickname: &str) -> String {
        format!("{nickname} - {FEED_TITLE_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_for() {
        assert_eq!(Feed::title_for("Alice"), "Alice - 笔记 • 小红书 / RED");
    }

    #[test]
    fn test_item_serializes_pub_date_key() {
        let item = FeedItem {
            title: "t".into(),
            link: "l".into(),
            description: "d".into(),
            author: "a".into(),
            guid: "g".into(),
            pub_date: DateTime::from_timestamp(0, 0),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["pubDate"], "1970-01-01T00:00:00Z");

        let item = FeedItem {
            pub_date: None,
            ..item
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("pubDate").is_none());
    }
}
