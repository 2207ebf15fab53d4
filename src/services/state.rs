// src/services/state.rs

//! Embedded application state extraction.
//!
//! Pages render from a `window.__INITIAL_STATE__=` object literal inlined in a
//! `<script>` element. The literal is JavaScript rather than JSON: absent
//! values appear as the bare token `undefined`, which is rewritten to `null`
//! before parsing. That rewrite is a platform accommodation, not a general
//! JSON extension.

use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{NoteDetail, UserState};

/// Text every state-carrying script starts with.
pub const STATE_MARKER: &str = "window.__INITIAL_STATE__=";

/// Parsed embedded state with shape-checked accessors.
#[derive(Debug, Clone)]
pub struct InitialState {
    root: Value,
}

impl InitialState {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Raw parsed value.
    pub fn value(&self) -> &Value {
        &self.root
    }

    /// The `user` subtree of a profile page.
    pub fn user(&self) -> Result<UserState> {
        self.typed_at("/user")
    }

    /// The note a detail page was rendered for.
    ///
    /// Resolved through `note.firstNoteId` into `note.noteDetailMap`.
    pub fn note_detail(&self) -> Result<NoteDetail> {
        let first_id = self
            .at("/note/firstNoteId")?
            .as_str()
            .ok_or_else(|| AppError::shape("/note/firstNoteId", "expected a string"))?;
        if first_id.is_empty() {
            return Err(AppError::shape("/note/firstNoteId", "empty note id"));
        }

        let path = format!("/note/noteDetailMap/{}/note", escape_pointer(first_id));
        self.typed_at(&path)
    }

    fn at(&self, path: &str) -> Result<&Value> {
        match self.root.pointer(path) {
            Some(Value::Null) | None => Err(AppError::shape(path, "missing")),
            Some(value) => Ok(value),
        }
    }

    fn typed_at<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.at(path)?;
        T::deserialize(value).map_err(|e| AppError::shape(path, e))
    }
}

/// Extract and parse the embedded state from an HTML document.
pub fn extract_state(html: &str) -> Result<InitialState> {
    let literal = find_state_script(html, STATE_MARKER).ok_or_else(|| AppError::StateNotFound {
        marker: STATE_MARKER.to_string(),
    })?;

    let normalized = undefined_to_null(literal.trim().trim_end_matches(';'));
    let root = serde_json::from_str(&normalized).map_err(AppError::StateParse)?;
    Ok(InitialState::new(root))
}

/// Text following `marker` in the first script that starts with it.
fn find_state_script(html: &str, marker: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").ok()?;

    document.select(&selector).find_map(|script| {
        let text: String = script.text().collect();
        text.strip_prefix(marker).map(str::to_string)
    })
}

/// Rewrite bare `undefined` tokens to `null`.
///
/// String literals and longer identifiers containing the word are left alone.
pub fn undefined_to_null(literal: &str) -> String {
    const TOKEN: &str = "undefined";

    let mut out = String::with_capacity(literal.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut rest = literal;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if rest.starts_with(TOKEN)
            && !prev.is_some_and(is_ident_char)
            && !rest[TOKEN.len()..].chars().next().is_some_and(is_ident_char)
        {
            out.push_str("null");
            rest = &rest[TOKEN.len()..];
            prev = Some('l');
            continue;
        }

        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Escape a key for use in a JSON pointer.
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
