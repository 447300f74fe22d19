//! Text previews and counts.

use crate::constants::ELLIPSIS;
use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("HTML tag pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Cuts `text` to `limit` characters, appending "..." when anything was cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Truncated text, or `placeholder` when there is no text at all.
pub fn preview(text: Option<&str>, limit: usize, placeholder: &str) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => truncate(t, limit),
        _ => placeholder.to_string(),
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.split_whitespace().count())
}

/// Drops tags, decodes the common entities and collapses whitespace.
pub fn strip_html(html: &str) -> String {
    let without_tags = HTML_TAG.replace_all(html, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RUN.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        // last, so "&amp;lt;" decodes to "&lt;" rather than "<"
        .replace("&amp;", "&")
}
