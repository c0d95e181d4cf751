use std::ops::Range;

use crate::scanner::{find_close_tag, find_closing_element, find_element, find_tag, read_attribute};

/// Find the next bookmark (`<a name="...">`) inside `section`.
///
/// Returns the position of the anchor's `<` and the bookmark name with any
/// leading `#` removed. Anchors without a `name` are passed over.
///
/// # Example
/// ```
/// use sieve_html::hyperlinks::find_bookmark;
///
/// let html = r##"<a href="x.html">x</a><a name="#intro">Intro</a>"##;
/// assert_eq!(find_bookmark(html, 0..html.len()), Some((22, "intro")));
/// ```
#[must_use]
pub fn find_bookmark(text: &str, section: Range<usize>) -> Option<(usize, &str)> {
    let mut start = section.start;
    loop {
        let anchor = find_element(text, start..section.end, "a")?;
        let tag = &text[anchor..];
        if let Some(range) = read_attribute(tag, "name", false, false) {
            let name = &tag[range];
            return Some((anchor, name.strip_prefix('#').unwrap_or(name)));
        }
        start = anchor + 1;
    }
}

/// Copy `html` with every hyperlink's `<a ...>` and `</a>` removed.
///
/// The anchor text stays in place. Bookmarks (anchors with a `name`) are
/// kept whole. If an anchor is never closed, the rest of the markup after
/// its opening tag is copied unchanged.
///
/// # Example
/// ```
/// use sieve_html::hyperlinks::strip_hyperlinks;
///
/// let html = r#"See <a href="faq.html"><b>the FAQ</b></a>.<a name="end"></a>"#;
/// assert_eq!(strip_hyperlinks(html), r#"See <b>the FAQ</b>.<a name="end"></a>"#);
/// ```
#[must_use]
pub fn strip_hyperlinks(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut copied_to = 0;
    let mut pos = 0;

    while let Some(anchor) = find_element(html, pos..html.len(), "a") {
        if find_tag(&html[anchor..], "name", false).is_some() {
            pos = anchor + 2;
            continue;
        }
        out.push_str(&html[copied_to..anchor]);
        copied_to = anchor;

        let Some(open_end) = find_close_tag(&html[anchor..]) else {
            break;
        };
        copied_to = anchor + open_end + 1;
        let Some(closing) = find_closing_element(html, copied_to..html.len(), "a") else {
            break;
        };
        out.push_str(&html[copied_to..closing]);
        copied_to = closing;

        let Some(closing_end) = find_close_tag(&html[closing..]) else {
            break;
        };
        copied_to = closing + closing_end + 1;
        pos = copied_to;
    }

    out.push_str(&html[copied_to..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_outside_section_is_not_found() {
        let html = r#"<p>text</p><a name="late">x</a>"#;
        assert_eq!(find_bookmark(html, 0..11), None);
    }

    #[test]
    fn test_unclosed_anchor_keeps_remaining_text() {
        assert_eq!(strip_hyperlinks(r#"a <a href="x">b c"#), "a b c");
    }
}
