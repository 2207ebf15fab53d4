//! Test utilities
//!
//! An in-memory `PageFetcher` plus page fixtures that mirror the shape of the
//! platform's embedded state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::services::STATE_MARKER;
use crate::utils::http::PageFetcher;

const UNDEFINED_PLACEHOLDER: &str = "\"__undefined__\"";

#[derive(Clone)]
struct Page {
    body: String,
    delay: Duration,
}

/// Serves registered pages, records every call and tracks peak concurrency.
///
/// Unregistered URLs fail with a 404 `Fetch` error.
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, Page>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&self, url: &str, body: String) {
        self.add_slow_page(url, body, Duration::ZERO);
    }

    pub fn add_slow_page(&self, url: &str, body: String, delay: Duration) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Page { body, delay });
    }

    /// Number of fetches issued for `url`.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Cookies sent with each fetch of `url`, in call order.
    pub fn cookies_for(&self, url: &str) -> Vec<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, cookie)| cookie.clone())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str, cookie: Option<&str>) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), cookie.map(str::to_string)));
        let page = self.pages.lock().unwrap().get(url).cloned();

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(page) = &page {
            tokio::time::sleep(page.delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        page.map(|p| p.body).ok_or_else(|| AppError::Fetch {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Wrap a state value in an HTML page, emitting JavaScript `undefined` for
/// every `"__undefined__"` string.
pub fn state_page(state: &Value) -> String {
    let literal = state.to_string().replace(UNDEFINED_PLACEHOLDER, "undefined");
    format!(
        "<!DOCTYPE html><html><head><script>window.__SSR__=true</script></head>\
         <body><div id=\"app\"></div><script>{STATE_MARKER}{literal}</script></body></html>"
    )
}

/// Profile page for `nickname` with note cards grouped as given.
pub fn profile_page(nickname: &str, groups: &[&[&str]]) -> String {
    let notes: Vec<Value> = groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|id| {
                    json!({
                        "id": id,
                        "noteCard": {
                            "noteId": id,
                            "type": "normal",
                            "displayTitle": format!("title {id}"),
                            "user": { "nickName": nickname, "userId": "u1", "avatar": "__undefined__" },
                            "cover": { "urlDefault": format!("https://img.example/cover/{id}.jpg") },
                            "interactInfo": { "liked": false, "likedCount": "12" }
                        }
                    })
                })
                .collect()
        })
        .collect();

    state_page(&json!({
        "global": { "appSettings": {} },
        "user": {
            "loggedIn": false,
            "userInfo": "__undefined__",
            "userPageData": {
                "basicInfo": {
                    "redId": "12345",
                    "nickname": nickname,
                    "desc": "hello\nworld",
                    "imageb": "https://img.example/avatar_b.jpg",
                    "images": "https://img.example/avatar_s.jpg"
                }
            },
            "notes": notes
        }
    }))
}

/// Detail page for one note.
pub fn note_page(note_id: &str, title: &str, desc: &str, images: &[&str], time: i64) -> String {
    let image_list: Vec<Value> = images
        .iter()
        .map(|url| json!({ "urlDefault": url, "width": 1080, "livePhoto": "__undefined__" }))
        .collect();

    state_page(&json!({
        "note": {
            "firstNoteId": note_id,
            "currentNoteId": "__undefined__",
            "noteDetailMap": {
                note_id: {
                    "comments": { "list": [] },
                    "note": {
                        "noteId": note_id,
                        "title": title,
                        "desc": desc,
                        "imageList": image_list,
                        "time": time,
                        "lastUpdateTime": "__undefined__"
                    }
                }
            }
        }
    }))
}
