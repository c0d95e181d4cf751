//! Link discovery across a whole document.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::javascript::JavascriptLinks;
use crate::scanner::{
    compare_element, find_close_tag, find_end_tag, find_ignore_case, find_tag, read_attribute,
};

/// What kind of reference a [`Hyperlink`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Anchors, `<link>`, `<area>`, frames, meta refreshes and links found
    /// inside script bodies.
    Plain,
    /// The `src` of an `<img>`.
    Image,
    /// The `src` of a `<script>`.
    Script,
}

/// A link as it appears in the markup, unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hyperlink<'a> {
    /// The raw attribute (or literal) value.
    pub url: &'a str,
    /// Where the link came from.
    pub kind: LinkKind,
}

/// A `<script>` body whose string literals are being scanned.
#[derive(Debug, Clone)]
struct ScriptSection<'a> {
    links: JavascriptLinks<'a>,
    /// Just past the `</script>`.
    resume: usize,
}

/// Iterator over every link in an HTML document.
///
/// Recognized sources, in document order:
/// - `href` of `<a>`, `<link>` and `<area>`
/// - `src` of `<frame>`, `<iframe>`, `<script>` and, when enabled, `<img>`
/// - the `url=` of `<meta http-equiv="refresh">`
/// - string literals inside `<script>` bodies that look like file links
///
/// Links are yielded raw. Resolve them against [`base_url`](Self::base_url)
/// (or the page's own URL) with
/// [`UrlResolver`](sieve_common::url::UrlResolver).
///
/// # Example
/// ```
/// use sieve_html::hyperlinks::{HyperlinkParser, LinkKind};
///
/// let html = r#"<a href="about.html">About</a><img src="logo.png"><frame src="nav.html">"#;
/// let links: Vec<_> = HyperlinkParser::new(html, true).map(|link| (link.url, link.kind)).collect();
/// assert_eq!(
///     links,
///     [("about.html", LinkKind::Plain), ("logo.png", LinkKind::Image), ("nav.html", LinkKind::Plain)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HyperlinkParser<'a> {
    html: &'a str,
    pos: usize,
    include_image_links: bool,
    base_url: Option<&'a str>,
    script: Option<ScriptSection<'a>>,
}

impl<'a> HyperlinkParser<'a> {
    /// Prepare to scan `html`. `<img>` sources are only reported when
    /// `include_image_links` is set.
    #[must_use]
    pub fn new(html: &'a str, include_image_links: bool) -> Self {
        Self {
            html,
            pos: 0,
            include_image_links,
            base_url: parse_base_url(html),
            script: None,
        }
    }

    /// The `href` of the document's `<base>` element, if `<head>` has one.
    #[must_use]
    pub const fn base_url(&self) -> Option<&'a str> {
        self.base_url
    }

    fn next_script_link(&mut self) -> Option<Hyperlink<'a>> {
        let section = self.script.as_mut()?;
        if let Some(url) = section.links.next() {
            return Some(Hyperlink {
                url,
                kind: LinkKind::Plain,
            });
        }
        self.pos = self.pos.max(section.resume);
        self.script = None;
        None
    }

    /// Start scanning the body of the `<script>` whose `<` is at `open`.
    fn enter_script(&mut self, open: usize) {
        let tag = &self.html[open..];
        self.script = find_close_tag(tag)
            .zip(find_end_tag(tag, "script"))
            .filter(|(close, end)| close < end)
            .map(|(close, end)| ScriptSection {
                links: JavascriptLinks::new(&tag[close + 1..end]),
                resume: open + end + "</script>".len(),
            });
    }
}

impl<'a> Iterator for HyperlinkParser<'a> {
    type Item = Hyperlink<'a>;

    fn next(&mut self) -> Option<Hyperlink<'a>> {
        if let Some(link) = self.next_script_link() {
            return Some(link);
        }

        loop {
            let open = self.pos + self.html.get(self.pos..)?.find('<')?;
            let after = &self.html[open + 1..];
            if after.is_empty() {
                return None;
            }
            self.pos = open + 1;
            if after.starts_with('/') {
                continue;
            }

            let is_image = compare_element(after, "img", false);
            let is_script = compare_element(after, "script", false);
            if is_script {
                self.enter_script(open);
            }

            if (self.include_image_links && is_image)
                || is_script
                || compare_element(after, "frame", false)
                || compare_element(after, "iframe", false)
            {
                if let Some(range) = read_attribute(after, "src", false, true) {
                    self.pos = open + 1 + range.end;
                    let kind = if is_image {
                        LinkKind::Image
                    } else if is_script {
                        LinkKind::Script
                    } else {
                        LinkKind::Plain
                    };
                    return Some(Hyperlink {
                        url: &after[range],
                        kind,
                    });
                }
                if let Some(link) = self.next_script_link() {
                    return Some(link);
                }
            } else if compare_element(after, "a", false)
                || compare_element(after, "link", false)
                || compare_element(after, "area", false)
            {
                if let Some(range) = read_attribute(after, "href", false, true) {
                    self.pos = open + 1 + range.end;
                    return Some(Hyperlink {
                        url: &after[range],
                        kind: LinkKind::Plain,
                    });
                }
            } else if compare_element(after, "meta", false)
                && let Some(url) = refresh_url(after)
            {
                return Some(Hyperlink {
                    url,
                    kind: LinkKind::Plain,
                });
            }
        }
    }
}

/// The target of `<meta http-equiv="refresh" content="5; url=...">`.
fn refresh_url(tag: &str) -> Option<&str> {
    let http_equiv = read_attribute(tag, "http-equiv", false, false)?;
    if !tag[http_equiv].eq_ignore_ascii_case("refresh") {
        return None;
    }
    let found = find_tag(tag, "url=", true)?;
    let value = &tag[found + "url=".len()..];
    let value = value.trim_start_matches(|c: char| c.is_whitespace() || c == '\'');
    let end = value.find(['\'', '"', '>'])?;
    (end > 0).then(|| &value[..end])
}

/// `href` of the first `<base>` after `<head>`.
fn parse_base_url(html: &str) -> Option<&str> {
    let head = find_ignore_case(html, "<head")?;
    let base = head + find_ignore_case(&html[head..], "<base")?;
    let href = base + find_ignore_case(&html[base..], "href=")?;
    let value_start = href + "href=".len();

    let (rest, terminators): (&str, &[char]) = match html.as_bytes().get(value_start) {
        Some(b'"' | b'\'') => (&html[value_start + 1..], &['"', '\'']),
        _ => (&html[value_start..], &[' ', '\r', '\n', '\t', '>']),
    };
    let rest = rest.trim_start();
    let end = rest.find(terminators)?;
    (end > 0).then(|| &rest[..end])
}
