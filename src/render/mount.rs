//! In-memory page document with named mount points.
//!
//! A mount point is any element carrying `data-mount="<name>"`. The page is
//! tokenized with `quick-xml` to find elements, so comments, attribute values
//! and `<script>`/`<style>` bodies never match. Only the byte ranges of the
//! touched elements are rewritten; everything else is kept verbatim.
//! Every operation here is idempotent.

use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{BytesStart, Event},
};
use std::{borrow::Cow, io::Cursor, ops::Range};

/// `id` of the JSON manifest script.
pub const MANIFEST_ID: &str = "folio-manifest";

/// Marker attribute on the stylesheet/script tags inserted by [`Document::link_assets`].
const ASSET_MARKER: &str = "data-folio-asset";

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"source", b"track", b"wbr",
];

/// Elements whose content is raw text, not markup.
const RAW_TEXT_ELEMENTS: &[&[u8]] = &[b"script", b"style", b"textarea"];

type XmlWriter = Writer<Cursor<Vec<u8>>>;

// ============================================================================
// Tokenizing
// ============================================================================

fn create_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader.config_mut().allow_unmatched_ends = true;
    reader
}

fn is_void(name: &[u8]) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn is_raw_text(name: &[u8]) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

fn attr_value(elem: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    elem.html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn has_attr(elem: &BytesStart<'_>, key: &[u8]) -> bool {
    elem.html_attributes()
        .flatten()
        .any(|attr| attr.key.as_ref() == key)
}

/// Rebuild an element with transformed attributes; `None` drops the attribute.
fn rebuild_elem<F>(elem: &BytesStart<'_>, mut transform: F) -> BytesStart<'static>
where
    F: FnMut(&[u8], Cow<'_, [u8]>) -> Option<Cow<'static, [u8]>>,
{
    let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let attrs: Vec<_> = elem
        .html_attributes()
        .flatten()
        .filter_map(|attr| {
            let key = attr.key.as_ref().to_vec();
            transform(attr.key.as_ref(), attr.value).map(|value| (key, value))
        })
        .collect();

    let mut new_elem = BytesStart::new(tag);
    for (k, v) in attrs {
        new_elem.push_attribute((k.as_slice(), v.as_ref()));
    }
    new_elem
}

/// Serialize a single opening tag.
fn write_open(elem: BytesStart<'_>, self_closing: bool) -> Option<String> {
    let mut writer: XmlWriter = Writer::new(Cursor::new(Vec::new()));
    let event = if self_closing {
        Event::Empty(elem)
    } else {
        Event::Start(elem)
    };
    writer.write_event(event).ok()?;
    String::from_utf8(writer.into_inner().into_inner()).ok()
}

/// Parse a lone opening tag such as `<div class="x">`.
fn parse_open(tag: &str) -> Option<BytesStart<'_>> {
    match create_reader(tag.as_bytes()).read_event().ok()? {
        Event::Start(elem) | Event::Empty(elem) => Some(elem),
        _ => None,
    }
}

/// Event reader over a page that reports byte offsets into the whole page.
///
/// Raw text (`<script>`, `<style>`) ends at the first matching end tag, as in
/// a browser, so the scanner restarts the reader right after it.
struct Scanner<'i> {
    html: &'i str,
    base: usize,
    reader: Reader<&'i [u8]>,
}

impl<'i> Scanner<'i> {
    fn new(html: &'i str) -> Self {
        Self {
            html,
            base: 0,
            reader: create_reader(html.as_bytes()),
        }
    }

    fn position(&self) -> usize {
        let local = usize::try_from(self.reader.buffer_position()).unwrap_or(usize::MAX);
        self.base.saturating_add(local)
    }

    fn next(&mut self) -> Option<Event<'i>> {
        self.reader.read_event().ok()
    }

    /// Skip the content of a raw text element whose start tag was just read.
    ///
    /// Returns the offsets of the end tag's `<` and one past its `>`.
    fn skip_raw_text(&mut self, name: &[u8]) -> Option<(usize, usize)> {
        let from = self.position();
        let needle = format!("</{}", String::from_utf8_lossy(name)).to_ascii_lowercase();
        let close = from + self.html.get(from..)?.to_ascii_lowercase().find(&needle)?;
        let end = close + self.html[close..].find('>')? + 1;

        self.base = end;
        self.reader = create_reader(&self.html.as_bytes()[end..]);
        Some((close, end))
    }

    /// Opening tag of the next element satisfying `want`, with the scanner left just after it.
    fn find_start(
        &mut self,
        want: &impl Fn(&BytesStart<'_>) -> bool,
    ) -> Option<(BytesStart<'i>, Range<usize>, bool)> {
        loop {
            let start = self.position();
            match self.next()? {
                Event::Start(elem) if want(&elem) => {
                    return Some((elem, start..self.position(), false));
                }
                Event::Empty(elem) if want(&elem) => {
                    return Some((elem, start..self.position(), true));
                }
                Event::Start(elem) if is_raw_text(elem.name().as_ref()) => {
                    self.skip_raw_text(elem.name().as_ref())?;
                }
                Event::Eof => return None,
                _ => {}
            }
        }
    }

    /// Walk to the end tag matching an already-read `name` start tag.
    ///
    /// Only same-name tags change the nesting depth. Returns the offset of the
    /// end tag's `<` and one past its `>`.
    fn find_close(&mut self, name: &[u8]) -> Option<(usize, usize)> {
        if is_raw_text(name) {
            return self.skip_raw_text(name);
        }

        let mut depth = 1usize;
        loop {
            let start = self.position();
            match self.next()? {
                Event::Start(elem) if elem.name().as_ref() == name => depth += 1,
                Event::Start(elem) if is_raw_text(elem.name().as_ref()) => {
                    self.skip_raw_text(elem.name().as_ref())?;
                }
                Event::End(elem) if elem.name().as_ref() == name => {
                    depth -= 1;
                    if depth == 0 {
                        return Some((start, self.position()));
                    }
                }
                Event::Eof => return None,
                _ => {}
            }
        }
    }
}

/// Byte ranges of one element in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    name: String,
    /// Opening tag, `<` through `>`.
    open: Range<usize>,
    /// Content between the tags; empty for void and self-closing elements.
    inner: Range<usize>,
    /// One past the closing tag, or past the opening tag when there is none.
    end: usize,
    self_closing: bool,
}

/// First element in `html` whose opening tag satisfies `want`.
fn find_element(html: &str, want: impl Fn(&BytesStart<'_>) -> bool) -> Option<Span> {
    let mut scanner = Scanner::new(html);
    let (elem, open, self_closing) = scanner.find_start(&want)?;
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();

    if self_closing || is_void(name.as_bytes()) {
        return Some(Span {
            name,
            inner: open.end..open.end,
            end: open.end,
            open,
            self_closing,
        });
    }

    let (close_start, end) = scanner.find_close(name.as_bytes())?;
    Some(Span {
        name,
        inner: open.end..close_start,
        end,
        open,
        self_closing,
    })
}

/// Offset of the `</name>` end tag; the last one when `last` is set.
fn find_end_tag(html: &str, name: &[u8], last: bool) -> Option<usize> {
    let mut scanner = Scanner::new(html);
    let mut found = None;
    loop {
        let start = scanner.position();
        let Some(event) = scanner.next() else {
            return found;
        };
        match event {
            Event::End(elem) if elem.name().as_ref() == name => {
                found = Some(start);
                if !last {
                    return found;
                }
            }
            Event::Start(elem) if is_raw_text(elem.name().as_ref()) => {
                if scanner.skip_raw_text(elem.name().as_ref()).is_none() {
                    return found;
                }
            }
            Event::Eof => return found,
            _ => {}
        }
    }
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn has_mount(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Replace the inner content of mount point `name`. Returns `false` if it does not exist.
    pub fn mount(&mut self, name: &str, inner: &str) -> bool {
        let Some(span) = self.locate(name) else {
            return false;
        };
        if span.self_closing {
            let open = self.html[span.open.clone()]
                .trim_end_matches('>')
                .trim_end_matches('/')
                .trim_end();
            let expanded = format!("{open}>{inner}</{}>", span.name);
            self.html.replace_range(span.open, &expanded);
        } else {
            self.html.replace_range(span.inner, inner);
        }
        true
    }

    /// Add or remove the `hidden` attribute of mount point `name`.
    pub fn set_hidden(&mut self, name: &str, hidden: bool) -> bool {
        let Some(span) = self.locate(name) else {
            return false;
        };

        let replacement = {
            let open = &self.html[span.open.clone()];
            let Some(elem) = parse_open(open) else {
                return false;
            };
            match (hidden, has_attr(&elem, b"hidden")) {
                (true, false) => {
                    let insert_at = if span.self_closing {
                        open.trim_end_matches('>').trim_end_matches('/').trim_end().len()
                    } else {
                        open.len() - 1
                    };
                    Some(format!("{} hidden{}", &open[..insert_at], &open[insert_at..]))
                }
                (false, true) => {
                    let rebuilt = rebuild_elem(&elem, |key, value| {
                        (key != b"hidden").then(|| Cow::Owned(value.into_owned()))
                    });
                    let Some(tag) = write_open(rebuilt, span.self_closing) else {
                        return false;
                    };
                    Some(tag)
                }
                _ => None,
            }
        };

        if let Some(replacement) = replacement {
            self.html.replace_range(span.open, &replacement);
        }
        true
    }

    pub fn is_hidden(&self, name: &str) -> Option<bool> {
        let span = self.locate(name)?;
        let elem = parse_open(&self.html[span.open])?;
        Some(has_attr(&elem, b"hidden"))
    }

    /// Inner content of mount point `name`.
    pub fn inner(&self, name: &str) -> Option<&str> {
        let span = self.locate(name)?;
        Some(&self.html[span.inner])
    }

    // ------------------------------------------------------------------------
    // Head
    // ------------------------------------------------------------------------

    pub fn set_title(&mut self, title: &str) {
        let escaped = super::html::escape(title);
        match find_element(&self.html, |e| e.name().as_ref() == b"title") {
            Some(span) if !span.self_closing => self.html.replace_range(span.inner, &escaped),
            _ => self.insert_before_head_end(&format!("<title>{escaped}</title>")),
        }
    }

    pub fn set_meta_description(&mut self, description: &str) {
        let tag = format!(
            r#"<meta name="description" content="{}">"#,
            super::html::escape_attr(description)
        );
        let found = find_element(&self.html, |e| {
            e.name().as_ref() == b"meta" && attr_value(e, b"name").as_deref() == Some("description")
        });
        match found {
            Some(span) => self.html.replace_range(span.open.start..span.end, &tag),
            None => self.insert_before_head_end(&tag),
        }
    }

    /// Set `<html lang>`. Without an `<html>` element this is a no-op.
    pub fn set_lang(&mut self, lang: &str) {
        let rewritten = {
            let mut scanner = Scanner::new(&self.html);
            let Some((elem, open, _)) = scanner.find_start(&|e| e.name().as_ref() == b"html")
            else {
                return;
            };

            let mut replaced = false;
            let mut rebuilt = rebuild_elem(&elem, |key, value| {
                if key == b"lang" {
                    replaced = true;
                    Some(Cow::Owned(escape(lang).as_bytes().to_vec()))
                } else {
                    Some(Cow::Owned(value.into_owned()))
                }
            });
            if !replaced {
                rebuilt.push_attribute(("lang", lang));
            }
            write_open(rebuilt, false).map(|tag| (open, tag))
        };

        if let Some((open, tag)) = rewritten {
            self.html.replace_range(open, &tag);
        }
    }

    /// Link the stylesheet and runtime script, replacing links from an earlier pass.
    pub fn link_assets(&mut self, stylesheet: &str, script: &str) {
        while let Some(span) = find_element(&self.html, |e| has_attr(e, ASSET_MARKER.as_bytes())) {
            self.html.replace_range(span.open.start..span.end, "");
        }
        let link = format!(
            r#"<link rel="stylesheet" href="{}" {ASSET_MARKER}>"#,
            super::html::escape_attr(stylesheet)
        );
        self.insert_before_head_end(&link);
        let script = format!(
            r#"<script src="{}" defer {ASSET_MARKER}></script>"#,
            super::html::escape_attr(script)
        );
        self.insert_before_body_end(&script);
    }

    /// Embed `json` as the page manifest, replacing any previous one.
    pub fn set_manifest(&mut self, json: &str) {
        while let Some(span) = find_element(&self.html, is_manifest) {
            self.html.replace_range(span.open.start..span.end, "");
        }
        // `<` only occurs inside JSON strings, where `\u003c` is equivalent.
        let json = json.replace('<', r"\u003c");
        let tag =
            format!(r#"<script type="application/json" id="{MANIFEST_ID}">{json}</script>"#);
        self.insert_before_body_end(&tag);
    }

    /// Manifest JSON as embedded, if any.
    pub fn manifest(&self) -> Option<String> {
        let span = find_element(&self.html, is_manifest)?;
        Some(self.html[span.inner].to_string())
    }

    pub fn insert_before_body_end(&mut self, snippet: &str) {
        let at = find_end_tag(&self.html, b"body", true);
        self.insert_at(at, snippet);
    }

    fn insert_before_head_end(&mut self, snippet: &str) {
        let at = find_end_tag(&self.html, b"head", false);
        self.insert_at(at, snippet);
    }

    /// Insert at `at`, or append when there is no such position.
    fn insert_at(&mut self, at: Option<usize>, snippet: &str) {
        match at {
            Some(at) => self.html.insert_str(at, snippet),
            None => self.html.push_str(snippet),
        }
    }

    fn locate(&self, name: &str) -> Option<Span> {
        find_element(&self.html, |e| {
            attr_value(e, b"data-mount").as_deref() == Some(name)
        })
    }
}

fn is_manifest(elem: &BytesStart<'_>) -> bool {
    elem.name().as_ref() == b"script" && attr_value(elem, b"id").as_deref() == Some(MANIFEST_ID)
}

// ============================================================================
// Tests
// ============================================================================
