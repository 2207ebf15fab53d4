// src/services/text.rs

//! Note text cleanup.
//!
//! Output is inserted into HTML descriptions as-is; nothing is escaped.

use std::sync::LazyLock;

use regex::Regex;

/// Sticker and emoji codes such as `[微笑R]`.
static BRACKET_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("static regex"));

/// Topic tags written as `#topic#`.
static DELIMITED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(.*?)#").expect("static regex"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("static regex"));

/// Clean a note description for rendering.
///
/// Removes bracketed codes, turns `#tag#` into `#tag`, then replaces each
/// `\n` with `<br>`.
pub fn normalize_description(text: &str) -> String {
    let text = BRACKET_CODE.replace_all(text, "");
    let text = DELIMITED_TAG.replace_all(&text, "#$1");
    text.replace('\n', "<br>")
}

/// Format plain profile text for an HTML description.
pub fn format_text(text: &str) -> String {
    LINE_BREAK
        .replace_all(text, "<br>")
        .replace('\t', "&emsp;")
}
