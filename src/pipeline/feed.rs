// src/pipeline/feed.rs

//! User notes feed pipeline.
//!
//! Picks between the summary-only listing and full-text enrichment, fans the
//! enrichment out over a bounded number of in-flight fetches and joins the
//! results back in listing order.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::Result;
use crate::models::{Config, DetailMode, Feed, FeedItem, NoteSummary};
use crate::services::{
    BasicNotesSource, CachedProfileNotes, NoteEnricher, ProfileFetcher, format_note, format_text,
};
use crate::storage::Cache;
use crate::utils::http::PageFetcher;
use crate::utils::{note_link, profile_url};

/// Parse the caller's mode selector.
///
/// Empty means no detail mode. `images` selects image-only descriptions;
/// any other value selects full text.
pub fn parse_mode(selector: &str) -> Option<DetailMode> {
    match selector {
        "" => None,
        "images" => Some(DetailMode::ImagesOnly),
        _ => Some(DetailMode::FullText),
    }
}

/// Builds feeds for user note listings.
pub struct NoteFeedBuilder {
    config: Arc<Config>,
    profiles: ProfileFetcher,
    enricher: NoteEnricher,
    basic: Arc<dyn BasicNotesSource>,
}

impl NoteFeedBuilder {
    /// Create a builder whose basic path lists notes from the profile page.
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>, cache: Arc<dyn Cache>) -> Self {
        let profiles = ProfileFetcher::new(fetcher.clone());
        let basic = Arc::new(CachedProfileNotes::new(profiles.clone(), cache.clone()));
        Self::with_basic_source(config, fetcher, cache, basic)
    }

    /// Create a builder with a custom summary-level source.
    pub fn with_basic_source(
        config: Arc<Config>,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn Cache>,
        basic: Arc<dyn BasicNotesSource>,
    ) -> Self {
        Self {
            config,
            profiles: ProfileFetcher::new(fetcher.clone()),
            enricher: NoteEnricher::new(fetcher, cache),
            basic,
        }
    }

    /// Build the feed for `user_id`.
    ///
    /// Full text is used only when a cookie is configured and `mode` is
    /// non-empty; otherwise the summary listing is used.
    pub async fn build(&self, user_id: &str, mode: &str) -> Result<Feed> {
        let url = profile_url(user_id)?;
        let cookie = self.config.xiaohongshu.cookie();

        match (cookie, parse_mode(mode)) {
            (Some(cookie), Some(detail_mode)) => {
                log::info!("Building {:?} feed for {}", detail_mode, url);
                self.build_fulltext(&url, cookie, detail_mode).await
            }
            _ => {
                log::info!("Building summary feed for {}", url);
                self.build_basic(&url, cookie).await
            }
        }
    }

    async fn build_fulltext(&self, url: &str, cookie: &str, mode: DetailMode) -> Result<Feed> {
        let profile_notes = self.profiles.fetch(url, Some(cookie)).await?;
        let items = self
            .enrich_all(url, &profile_notes.notes, cookie, mode)
            .await?;
        let profile = profile_notes.profile;

        Ok(Feed {
            title: Feed::title_for(&profile.nickname),
            description: profile.desc.clone(),
            image: profile.avatar(),
            link: url.to_string(),
            item: items,
        })
    }

    /// Enrich every note, at most `max_concurrent` at a time.
    ///
    /// Items come back in the order of `notes`. The first failure aborts the
    /// whole batch.
    async fn enrich_all(
        &self,
        url: &str,
        notes: &[NoteSummary],
        cookie: &str,
        mode: DetailMode,
    ) -> Result<Vec<FeedItem>> {
        let concurrency = self.config.crawler.max_concurrent.max(1);

        stream::iter(notes)
            .map(|note| self.enrich_note(url, note, cookie, mode))
            .buffered(concurrency)
            .try_collect()
            .await
    }

    async fn enrich_note(
        &self,
        url: &str,
        note: &NoteSummary,
        cookie: &str,
        mode: DetailMode,
    ) -> Result<FeedItem> {
        let link = note_link(url, &note.note_id);
        let detail = self.enricher.enrich(&link, Some(cookie), mode).await?;
        Ok(FeedItem {
            title: detail.title,
            link,
            description: detail.description,
            author: note.author.clone(),
            guid: note.note_id.clone(),
            pub_date: detail.pub_date,
        })
    }

    async fn build_basic(&self, url: &str, cookie: Option<&str>) -> Result<Feed> {
        let profile_notes = self.basic.list_notes(url, cookie).await?;
        let profile = &profile_notes.profile;

        Ok(Feed {
            title: Feed::title_for(&profile.nickname),
            description: format_text(&profile.desc),
            image: profile.avatar(),
            link: url.to_string(),
            item: profile_notes
                .notes
                .iter()
                .map(|note| format_note(url, note))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ProfileNotes;
    use crate::storage::MemoryCache;
    use crate::test_utils::{FakeFetcher, note_page, profile_page};
    use async_trait::async_trait;
    use std::time::Duration;

    const USER: &str = "u1";
    const URL: &str = "https://www.xiaohongshu.com/user/profile/u1";

    fn config(cookie: Option<&str>, max_concurrent: usize) -> Arc<Config> {
        let mut config = Config::default();
        config.xiaohongshu.cookie = cookie.map(str::to_string);
        config.crawler.max_concurrent = max_concurrent;
        Arc::new(config)
    }

    fn builder(config: Arc<Config>, fetcher: Arc<FakeFetcher>) -> NoteFeedBuilder {
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(60), 100));
        NoteFeedBuilder::new(config, fetcher, cache)
    }

    fn add_note(fetcher: &FakeFetcher, id: &str, delay_ms: u64) {
        fetcher.add_slow_page(
            &format!("{URL}/{id}"),
            note_page(id, &format!("Note {id}"), "text [x]\n#tag#", &["https://img/1.jpg"], 1_000),
            Duration::from_millis(delay_ms),
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(""), None);
        assert_eq!(parse_mode("images"), Some(DetailMode::ImagesOnly));
        assert_eq!(parse_mode("fulltext"), Some(DetailMode::FullText));
        assert_eq!(parse_mode("anything"), Some(DetailMode::FullText));
        assert_eq!(parse_mode(" "), Some(DetailMode::FullText));
    }

    #[tokio::test]
    async fn test_fulltext_preserves_order_regardless_of_latency() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1", "n2"], &["n3"]]));
        add_note(&fetcher, "n1", 60);
        add_note(&fetcher, "n2", 30);
        add_note(&fetcher, "n3", 0);

        let feed = builder(config(Some("web_session=abc"), 5), fetcher.clone())
            .build(USER, "fulltext")
            .await
            .unwrap();

        let guids: Vec<_> = feed.item.iter().map(|i| i.guid.as_str()).collect();
        assert_eq!(guids, vec!["n1", "n2", "n3"]);
        assert_eq!(feed.item[2].title, "Note n3");
        assert_eq!(feed.item[2].link, format!("{URL}/n3"));
        assert_eq!(feed.item[0].author, "Alice");
        assert_eq!(
            feed.item[0].description,
            "<img src=\"https://img/1.jpg\"><br>Note n1<br>text <br>#tag"
        );
        assert!(feed.item[0].pub_date.is_some());

        assert_eq!(feed.title, "Alice - 笔记 • 小红书 / RED");
        assert_eq!(feed.description, "hello\nworld");
        assert_eq!(feed.image, "https://img.example/avatar_b.jpg");
        assert_eq!(feed.link, URL);
        assert!(fetcher.max_in_flight() > 1);
    }

    #[tokio::test]
    async fn test_images_mode() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1"]]));
        add_note(&fetcher, "n1", 0);

        let feed = builder(config(Some("c=1"), 5), fetcher)
            .build(USER, "images")
            .await
            .unwrap();

        assert_eq!(feed.item[0].description, "<img src=\"https://img/1.jpg\">");
    }

    #[tokio::test]
    async fn test_fanout_is_bounded_by_config() {
        let fetcher = Arc::new(FakeFetcher::new());
        let ids = ["n1", "n2", "n3", "n4", "n5", "n6"];
        fetcher.add_page(URL, profile_page("Alice", &[&ids]));
        for id in ids {
            add_note(&fetcher, id, 20);
        }

        let feed = builder(config(Some("c=1"), 2), fetcher.clone())
            .build(USER, "fulltext")
            .await
            .unwrap();

        assert_eq!(feed.item.len(), 6);
        assert!(fetcher.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_feed() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1", "n2", "n3"]]));
        add_note(&fetcher, "n1", 0);
        add_note(&fetcher, "n3", 0);

        let err = builder(config(Some("c=1"), 5), fetcher)
            .build(USER, "fulltext")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Fetch { ref url, .. } if url.ends_with("/n2")));
    }

    #[tokio::test]
    async fn test_repeat_request_uses_cached_notes() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1", "n2"]]));
        add_note(&fetcher, "n1", 0);
        add_note(&fetcher, "n2", 0);
        let builder = builder(config(Some("c=1"), 5), fetcher.clone());

        builder.build(USER, "fulltext").await.unwrap();
        builder.build(USER, "fulltext").await.unwrap();

        assert_eq!(fetcher.fetch_count(&format!("{URL}/n1")), 1);
        assert_eq!(fetcher.fetch_count(&format!("{URL}/n2")), 1);
        assert_eq!(fetcher.fetch_count(URL), 2);
    }

    #[tokio::test]
    async fn test_without_cookie_uses_basic_even_for_fulltext() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1", "n2"]]));
        add_note(&fetcher, "n1", 0);

        let feed = builder(config(None, 5), fetcher.clone())
            .build(USER, "fulltext")
            .await
            .unwrap();

        assert_eq!(fetcher.total_fetches(), 1);
        assert_eq!(fetcher.fetch_count(URL), 1);
        assert_eq!(feed.description, "hello<br>world");
        assert_eq!(
            feed.item[0].description,
            "<img src=\"https://img.example/cover/n1.jpg\"><br>title n1"
        );
        assert!(feed.item[0].pub_date.is_none());
    }

    #[tokio::test]
    async fn test_empty_mode_uses_basic_with_cookie() {
        let fetcher = Arc::new(FakeFetcher::new());
        fetcher.add_page(URL, profile_page("Alice", &[&["n1"]]));

        let feed = builder(config(Some("c=1"), 5), fetcher.clone())
            .build(USER, "")
            .await
            .unwrap();

        assert_eq!(feed.item.len(), 1);
        assert_eq!(fetcher.total_fetches(), 1);
        assert_eq!(fetcher.cookies_for(URL), vec![Some("c=1".to_string())]);
    }

    struct StaticSource(ProfileNotes);

    #[async_trait]
    impl BasicNotesSource for StaticSource {
        async fn list_notes(&self, _url: &str, _cookie: Option<&str>) -> Result<ProfileNotes> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_custom_basic_source() {
        let fetcher = Arc::new(FakeFetcher::new());
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(60), 10));
        let source = StaticSource(ProfileNotes {
            profile: crate::models::Profile {
                nickname: "Bob".into(),
                desc: "a\tb".into(),
                ..Default::default()
            },
            notes: vec![NoteSummary {
                note_id: "x".into(),
                display_title: "hi".into(),
                ..Default::default()
            }],
        });

        let builder =
            NoteFeedBuilder::with_basic_source(config(None, 5), fetcher.clone(), cache, Arc::new(source));
        let feed = builder.build(USER, "").await.unwrap();

        assert_eq!(feed.title, "Bob - 笔记 • 小红书 / RED");
        assert_eq!(feed.description, "a&emsp;b");
        assert_eq!(feed.item[0].link, format!("{URL}/x"));
        assert_eq!(fetcher.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_invalid_user_id() {
        let fetcher = Arc::new(FakeFetcher::new());
        let err = builder(config(None, 5), fetcher)
            .build("..", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
