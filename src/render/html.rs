//! HTML escaping and small markup helpers shared by the section builders.

use std::borrow::Cow;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape an attribute value. Same entity set as [`escape`].
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Escape `text` and turn blank-line separated blocks into `<p>` elements.
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape(p)))
        .collect()
}

/// `<ul class="{class}">` with one escaped `<li>` per item. Empty lists still render the `<ul>`.
pub fn list<S: AsRef<str>>(class: &str, items: &[S]) -> String {
    let mut html = format!(r#"<ul class="{class}">"#);
    for item in items {
        html.push_str(&format!("<li>{}</li>", escape(item.as_ref())));
    }
    html.push_str("</ul>");
    html
}

/// Inline tag chips, e.g. technology badges.
pub fn tags<S: AsRef<str>>(class: &str, items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!(r#"<span class="{class}">{}</span>"#, escape(item.as_ref())))
        .collect()
}

/// `<span class="icon">` for an optional icon, empty otherwise.
pub fn icon(icon: Option<&str>) -> String {
    icon.map(|i| format!(r#"<span class="icon">{}</span>"#, escape(i)))
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
