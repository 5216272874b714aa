//! HTML entity escaping and markup stripping.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::object::flip;

const ESCAPE_TABLE: [(&str, &str); 5] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#39;"),
];

fn escape_map() -> &'static Map<String, Value> {
    static MAP: OnceLock<Map<String, Value>> = OnceLock::new();
    MAP.get_or_init(|| {
        ESCAPE_TABLE
            .iter()
            .map(|(raw, entity)| (raw.to_string(), Value::String(entity.to_string())))
            .collect()
    })
}

fn unescape_map() -> &'static Map<String, Value> {
    static MAP: OnceLock<Map<String, Value>> = OnceLock::new();
    MAP.get_or_init(|| flip(escape_map()))
}

fn escape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[&<>"']"#).unwrap())
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(?:amp|lt|gt|quot|#(0+)?39);").unwrap())
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<.*?>").unwrap())
}

fn inline_style_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"style\s*=\s*"(.*?)""#).unwrap())
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Escape `& < > " '` as HTML entities (`'` becomes `&#39;`).
///
/// # Examples
///
/// ```
/// use utilkit::html::escape;
///
/// assert_eq!(escape("<html></html>"), "&lt;html&gt;&lt;/html&gt;");
/// assert_eq!(escape("fish & chips"), "fish &amp; chips");
/// ```
pub fn escape(s: &str) -> String {
    if !escape_regex().is_match(s) {
        return s.to_string();
    }
    let table = escape_map();
    escape_regex()
        .replace_all(s, |caps: &regex::Captures| {
            lookup(table, &caps[0]).unwrap_or(&caps[0]).to_string()
        })
        .into_owned()
}

/// Reverse [`escape`]. Zero-padded apostrophe entities (`&#039;`) are
/// accepted too.
///
/// # Examples
///
/// ```
/// use utilkit::html::unescape;
///
/// assert_eq!(unescape("&lt;b&gt;Tom&#039;s&lt;/b&gt;"), "<b>Tom's</b>");
/// ```
pub fn unescape(s: &str) -> String {
    if !entity_regex().is_match(s) {
        return s.to_string();
    }
    let table = unescape_map();
    entity_regex()
        .replace_all(s, |caps: &regex::Captures| {
            lookup(table, &caps[0]).unwrap_or("'").to_string()
        })
        .into_owned()
}

/// Remove anything that looks like a tag. Tags do not span lines.
///
/// # Examples
///
/// ```
/// use utilkit::html::remove_html_tags;
///
/// assert_eq!(remove_html_tags("<p>Hello, <b>world</b>!</p>"), "Hello, world!");
/// ```
pub fn remove_html_tags(s: &str) -> String {
    tag_regex().replace_all(s, "").into_owned()
}

/// Remove `style="..."` attributes.
pub fn remove_inline_styles(s: &str) -> String {
    inline_style_regex().replace_all(s, "").into_owned()
}
