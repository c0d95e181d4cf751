//! The extraction state machine.
//!
//! [`HtmlExtractor`] walks the markup from one `<` to the next. Each tag is
//! classified by [`Element`] and either emits layout characters (paragraph
//! breaks, tabs), changes the [`TextMode`], fills a metadata field, or skips
//! an opaque body. The text between two tags goes through the raw-text
//! decoder.

use serde::Serialize;
use sieve_common::warning::Diagnostics;

use super::element::Element;
use crate::decoder::{TextMode, convert_symbol_font, decode_raw_text};
use crate::scanner::{
    element_name, find_close_tag, find_closing_element, find_end_tag, read_attribute,
    starts_with_ignore_case,
};

/// Diagnostic component for structural problems.
const MARKUP: &str = "markup";
/// Diagnostic component for Symbol font conversions.
const SYMBOL_FONT: &str = "symbol-font";

/// `page-break-before` values that put a form feed before a paragraph.
const PAGE_BREAK_VALUES: [&str; 4] = ["always", "auto", "left", "right"];

/// Options for a top-level [`HtmlExtractor::extract`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Keep text before the first tag and after the last one.
    pub include_outer_text: bool,
    /// Keep line endings everywhere, as if the whole document were `<pre>`.
    pub preserve_newlines: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_outer_text: true,
            preserve_newlines: false,
        }
    }
}

/// The result of an extraction, detached from the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Extracted plain text.
    pub text: String,
    /// Content of `<title>`.
    pub title: String,
    /// `<meta name="author">` content.
    pub author: String,
    /// `<meta name="description">` content.
    pub description: String,
    /// `<meta name="keywords">` content.
    pub keywords: String,
    /// Content of `<subject>`.
    pub subject: String,
    /// Recovered anomalies, in the order they were found.
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum MetaField {
    Title,
    Author,
    Description,
    Keywords,
    Subject,
}

impl MetaField {
    fn from_meta_name(name: &str) -> Option<Self> {
        [
            ("author", Self::Author),
            ("description", Self::Description),
            ("keywords", Self::Keywords),
        ]
        .into_iter()
        .find_map(|(key, field)| name.eq_ignore_ascii_case(key).then_some(field))
    }
}

/// What the main loop does after one tag has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The tag ends just before `end`; the text after it is decoded.
    Tag { end: usize, symbol_font: bool },
    /// Continue at the `<` at this position without decoding anything.
    Resume(usize),
    /// Nothing more can be extracted.
    Stop,
}

/// Converts HTML into plain text plus document metadata.
///
/// One extractor can be reused for any number of documents; every call to
/// [`extract`](Self::extract) resets the text, the metadata and the
/// diagnostics.
///
/// # Example
/// ```
/// use sieve_html::extractor::{ExtractOptions, HtmlExtractor};
///
/// let mut extractor = HtmlExtractor::new();
/// let html = "<title>Menu</title><p>Fish &amp; chips</p>";
/// let text = extractor.extract(html, ExtractOptions::default());
/// assert_eq!(text, Some("\n\nFish & chips\n\n"));
/// assert_eq!(extractor.title(), "Menu");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor {
    text: String,
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
    keywords: Option<String>,
    subject: Option<String>,
    mode: TextMode,
    include_outer_text: bool,
    diagnostics: Diagnostics,
}

impl HtmlExtractor {
    /// Create an extractor with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the plain text of `html`.
    ///
    /// Returns `None` for empty input. Malformed markup never fails the call;
    /// each recovery is recorded in [`diagnostics`](Self::diagnostics).
    pub fn extract(&mut self, html: &str, options: ExtractOptions) -> Option<&str> {
        self.reset();
        if html.is_empty() {
            return None;
        }
        if options.preserve_newlines {
            self.mode.preformatted_depth = 1;
        }
        self.text.reserve(html.len() / 2);
        self.run(html, options.include_outer_text);
        Some(&self.text)
    }

    /// Text produced by the last call to [`extract`](Self::extract).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document title, or empty if none was found.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Author from `<meta name="author">`, or empty.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }

    /// Description from `<meta name="description">`, or empty.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Keywords from `<meta name="keywords">`, or empty.
    #[must_use]
    pub fn keywords(&self) -> &str {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Content of the non-standard `<subject>` element, or empty.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    /// Anomalies recovered from during the last extraction.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Snapshot of the last extraction's text, metadata and diagnostics.
    #[must_use]
    pub fn document(&self) -> ExtractedDocument {
        ExtractedDocument {
            text: self.text.clone(),
            title: self.title().to_string(),
            author: self.author().to_string(),
            description: self.description().to_string(),
            keywords: self.keywords().to_string(),
            subject: self.subject().to_string(),
            diagnostics: self.diagnostics.messages(),
        }
    }

    fn reset(&mut self) {
        self.text.clear();
        self.title = None;
        self.author = None;
        self.description = None;
        self.keywords = None;
        self.subject = None;
        self.mode = TextMode::default();
        self.diagnostics.clear();
    }

    fn run(&mut self, html: &str, include_outer_text: bool) {
        self.include_outer_text = include_outer_text;
        let Some(first) = html.find('<') else {
            if include_outer_text {
                self.decode_span(html, false);
            }
            return;
        };
        if include_outer_text {
            self.decode_span(&html[..first], false);
        }

        let mut pos = first;
        loop {
            match self.step(html, pos) {
                Step::Tag { end, symbol_font } => match html[end..].find('<') {
                    Some(offset) => {
                        let next = end + offset;
                        self.decode_span(&html[end..next], symbol_font);
                        pos = next;
                    }
                    None => {
                        if include_outer_text {
                            self.decode_span(&html[end..], false);
                        }
                        return;
                    }
                },
                Step::Resume(next) => pos = next,
                Step::Stop => return,
            }
        }
    }

    // ========================================================================
    // Tag dispatch
    // ========================================================================

    /// Handle the tag whose `<` is at `pos`.
    fn step(&mut self, html: &str, pos: usize) -> Step {
        let tag = &html[pos..];
        let after = &html[pos + 1..];

        if tag.starts_with("<!--") {
            return match html[pos + 2..].find("-->") {
                Some(offset) => Step::Tag {
                    end: pos + 2 + offset + 3,
                    symbol_font: false,
                },
                None => {
                    self.diagnostics
                        .push(MARKUP, "Unterminated comment; rest of document ignored");
                    Step::Stop
                }
            };
        }

        let name = element_name(after, true);
        let element = Element::from_name(name);
        match element {
            Some(el) if el.is_opaque() => return Self::skip_opaque(html, pos, el),
            Some(Element::Meta) => return self.read_meta(html, pos),
            Some(el @ Element::Title) => {
                return self.read_metadata_element(html, pos, el, MetaField::Title);
            }
            Some(el @ Element::Subject) => {
                return self.read_metadata_element(html, pos, el, MetaField::Subject);
            }
            _ => {}
        }

        // an unencoded '<' in running text
        if after.as_bytes().first().is_some_and(u8::is_ascii_whitespace)
            || starts_with_ignore_case(after, "&nbsp;")
        {
            return self.literal_until_next_tag(html, pos);
        }

        if starts_with_ignore_case(after, "![CDATA[") {
            return self.read_cdata(html, pos);
        }

        let symbol_font = is_symbol_font(after, element);
        let mut tag_start = pos;
        if let Some(closed) = name.strip_prefix('/') {
            if let Some(el) = Element::from_name(closed) {
                self.close_element(el);
            }
        } else if let Some(el) = element
            && let Some(skip_to) = self.open_element(html, pos, el)
        {
            tag_start = skip_to;
        }

        match find_close_tag(&html[tag_start..]) {
            Some(close) => Step::Tag {
                end: tag_start + close + 1,
                symbol_font,
            },
            None => {
                let unterminated = element_name(&html[tag_start + 1..], true);
                self.diagnostics.push(
                    MARKUP,
                    format!("Unterminated <{unterminated}> tag read as text"),
                );
                self.literal_until_next_tag(html, tag_start)
            }
        }
    }

    /// `script`, `style` and friends: jump past the closing tag.
    fn skip_opaque(html: &str, pos: usize, element: Element) -> Step {
        let tag = &html[pos..];
        let name = element.as_ref();
        if let Some(end_tag) = find_end_tag(tag, name) {
            return Step::Tag {
                end: pos + end_tag + name.len() + 3,
                symbol_font: false,
            };
        }
        // unclosed: step over the opening tag and continue at the next one
        find_close_tag(tag)
            .and_then(|close| {
                let body = pos + close + 1;
                html[body..].find('<').map(|offset| Step::Resume(body + offset))
            })
            .unwrap_or(Step::Stop)
    }

    fn read_meta(&mut self, html: &str, pos: usize) -> Step {
        let tag = &html[pos..];
        let Some(close) = find_close_tag(tag) else {
            return self.literal_until_next_tag(html, pos);
        };

        let field = read_attribute(tag, "name", false, false)
            .and_then(|range| MetaField::from_meta_name(&tag[range]));
        if let Some(field) = field {
            let content = read_attribute(tag, "content", false, true).map_or("", |range| &tag[range]);
            let value = self.extract_nested(content);
            self.set_metadata(field, value);
        }

        Step::Tag {
            end: pos + close + 1,
            symbol_font: false,
        }
    }

    /// `<title>` and `<subject>`: the content up to the closing tag becomes
    /// the metadata value.
    fn read_metadata_element(
        &mut self,
        html: &str,
        pos: usize,
        element: Element,
        field: MetaField,
    ) -> Step {
        let tag = &html[pos..];
        let Some(close) = find_close_tag(tag) else {
            return self.literal_until_next_tag(html, pos);
        };
        let content_start = pos + close + 1;
        let name = element.as_ref();

        match find_end_tag(tag, name) {
            Some(end_tag) if pos + end_tag >= content_start => {
                let content_end = pos + end_tag;
                let value = self.extract_nested(&html[content_start..content_end]);
                self.set_metadata(field, value);
                Step::Tag {
                    end: content_end + name.len() + 3,
                    symbol_font: false,
                }
            }
            _ => html[content_start..]
                .find('<')
                .map_or(Step::Stop, |offset| Step::Resume(content_start + offset)),
        }
    }

    fn read_cdata(&mut self, html: &str, pos: usize) -> Step {
        let content_start = pos + "<![CDATA[".len();
        if let Some(offset) = html[content_start..].find("]]>") {
            let content_end = content_start + offset;
            self.text.push_str(&html[content_start..content_end]);
            return Step::Tag {
                end: content_end + 3,
                symbol_font: false,
            };
        }

        self.diagnostics.push(MARKUP, "Unterminated CDATA section");
        let saved = self.mode;
        self.mode.preformatted_depth += 1;
        self.decode_span(&html[content_start..], false);
        self.mode = saved;
        Step::Stop
    }

    /// Decode from the `<` at `pos` up to the next `<` as ordinary text.
    fn literal_until_next_tag(&mut self, html: &str, pos: usize) -> Step {
        match html[pos + 1..].find('<') {
            Some(offset) => {
                let next = pos + 1 + offset;
                self.decode_span(&html[pos..next], false);
                Step::Resume(next)
            }
            // an unterminated last tag is outer text
            None => {
                if self.include_outer_text {
                    self.decode_span(&html[pos..], false);
                }
                Step::Stop
            }
        }
    }

    // ========================================================================
    // Layout emission
    // ========================================================================

    /// Apply an opening tag. Returns the `<` of a closing tag to continue
    /// from when the element's body is hidden.
    fn open_element(&mut self, html: &str, pos: usize, element: Element) -> Option<usize> {
        let tag = &html[pos + 1..];
        match element {
            Element::Pre => self.mode.preformatted_depth += 1,
            Element::Sup => self.mode.superscript_depth += 1,
            Element::Sub => self.mode.subscript_depth += 1,
            Element::Br => self.text.push('\n'),
            Element::Li => self.text.push_str("\n\t"),
            Element::Td => self.text.push('\t'),
            Element::Dd => self.text.push_str(":\t"),
            Element::A => {
                // e-mail and phone links often run into the preceding word
                let href = attribute(tag, "href", false, false);
                if starts_with_ignore_case(href, "mailto:") || starts_with_ignore_case(href, "tel:") {
                    self.text.push(' ');
                }
                if attribute(tag, "class", false, true).contains("FooterLink") {
                    self.text.push_str("\n\n");
                }
            }
            Element::Span => {
                match attribute(tag, "data-type", false, false) {
                    "newline" => self.text.push('\n'),
                    "footnote-ref-content" => self.text.push('\t'),
                    _ => {}
                }
                let class = attribute(tag, "class", false, true);
                if class.contains("BookBanner") || class == "os-caption" {
                    self.text.push_str("\n\n");
                } else if class == "os-term-section" {
                    self.text.push('\t');
                } else if class.contains("hidden") {
                    return find_closing_element(html, pos..html.len(), "span");
                }
            }
            el if el.breaks_paragraph() => {
                self.text.push_str("\n\n");
                let page_break = attribute(tag, "page-break-before", true, false);
                if PAGE_BREAK_VALUES
                    .iter()
                    .any(|value| starts_with_ignore_case(page_break, value))
                {
                    self.text.push('\x0c');
                }
            }
            _ => {}
        }
        None
    }

    fn close_element(&mut self, element: Element) {
        match element {
            Element::Pre => {
                self.mode.preformatted_depth = self.mode.preformatted_depth.saturating_sub(1);
            }
            Element::Sup => {
                self.mode.superscript_depth = self.mode.superscript_depth.saturating_sub(1);
            }
            Element::Sub => {
                self.mode.subscript_depth = self.mode.subscript_depth.saturating_sub(1);
            }
            el if el.closing_breaks_paragraph() => self.text.push_str("\n\n"),
            _ => {}
        }
    }

    // ========================================================================
    // Text and metadata
    // ========================================================================

    fn decode_span(&mut self, span: &str, symbol_font: bool) {
        let before = self.text.len();
        decode_raw_text(span, self.mode, &mut self.text, &mut self.diagnostics);
        if symbol_font && self.text.len() > before {
            let converted = convert_symbol_font(&self.text[before..]);
            self.text.truncate(before);
            self.text.push_str(&converted);
            self.diagnostics.push(
                SYMBOL_FONT,
                format!("Symbol font used for the following: \"{converted}\""),
            );
        }
    }

    /// Extract HTML embedded in a metadata value with a fresh extractor.
    ///
    /// Diagnostics from the nested run are kept in this extractor's log.
    fn extract_nested(&mut self, html: &str) -> String {
        let mut nested = Self::new();
        let value = nested
            .extract(html, ExtractOptions::default())
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        self.diagnostics.append(&mut nested.diagnostics);
        value
    }

    /// The first non-empty value for a field is kept.
    fn set_metadata(&mut self, field: MetaField, value: String) {
        let slot = match field {
            MetaField::Title => &mut self.title,
            MetaField::Author => &mut self.author,
            MetaField::Description => &mut self.description,
            MetaField::Keywords => &mut self.keywords,
            MetaField::Subject => &mut self.subject,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value);
        }
    }
}

/// The value of an attribute of `tag`, or `""`.
fn attribute<'a>(tag: &'a str, name: &str, allow_quoted: bool, allow_spaces: bool) -> &'a str {
    read_attribute(tag, name, allow_quoted, allow_spaces).map_or("", |range| &tag[range])
}

/// Whether the text after this tag is written in the legacy Symbol font.
fn is_symbol_font(tag: &str, element: Option<Element>) -> bool {
    let family = attribute(tag, "font-family", true, true);
    starts_with_ignore_case(family, "Symbol")
        || (element == Some(Element::Font)
            && starts_with_ignore_case(attribute(tag, "face", false, true), "Symbol"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> String {
        let mut extractor = HtmlExtractor::new();
        extractor
            .extract(html, ExtractOptions::default())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_meta_name_lookup() {
        assert!(matches!(MetaField::from_meta_name("AUTHOR"), Some(MetaField::Author)));
        assert!(MetaField::from_meta_name("viewport").is_none());
    }

    #[test]
    fn test_hidden_span_body_is_skipped() {
        let text = extract(r#"a<span class="hidden">b<span>c</span>d</span>e"#);
        assert_eq!(text, "ae");
    }

    #[test]
    fn test_closing_depth_never_underflows() {
        let text = extract("</pre></sup>a\nb");
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_step_resumes_after_stray_angle() {
        let mut extractor = HtmlExtractor::new();
        let html = "< 3<b>x";
        assert_eq!(extractor.step(html, 0), Step::Resume(3));
    }
}
