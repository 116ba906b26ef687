//! HTML-safe text helpers for chat messages.

/// Escapes the characters the chat transport's HTML mode treats as markup.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A quest title fit for display: escaped, with a placeholder when empty.
#[must_use]
pub fn quest_label(title: &str) -> String {
    if title.trim().is_empty() {
        "(untitled)".to_owned()
    } else {
        escape(title)
    }
}
