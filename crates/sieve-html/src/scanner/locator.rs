//! Tag, attribute and element location.
//!
//! These functions answer structural questions about raw markup without
//! building any tree: where does this tag end, what is the value of that
//! attribute, where is the balanced closing element. Every search is
//! quote-aware where a quoted attribute value could otherwise fool it.
//!
//! Positions are byte offsets into the `text` argument. Functions that take a
//! `section` range interpret it against the same `text`.

use std::ops::Range;

use super::primitives::{
    QuoteTracker, find_ignore_case, find_substring_outside_quotes, starts_with_ignore_case,
};

/// Find the `>` that closes the tag starting at (or just after) the `<` at the
/// front of `text`.
///
/// `>` characters inside quoted attribute values are skipped, and any nested
/// `<`...`>` pair is balanced before the closing `>` is accepted. Returns
/// `None` if the text ends first.
///
/// # Example
/// ```
/// use sieve_html::scanner::find_close_tag;
///
/// assert_eq!(find_close_tag(r#"<a title="1 > 0">x"#), Some(16));
/// assert_eq!(find_close_tag("<b text"), None);
/// ```
#[must_use]
pub fn find_close_tag(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'<'));

    let mut quotes = QuoteTracker::default();
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        quotes.update(byte);
        if quotes.is_inside() {
            continue;
        }
        match byte {
            b'<' => depth += 1,
            b'>' if depth == 0 => return Some(i),
            b'>' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Find `tag` (an attribute name, or a CSS property inside a `style` value)
/// within the element at the front of `text`.
///
/// The match must be a whole token: at the very start of `text`, or preceded
/// by whitespace or `;`. With `allow_quoted`, a match right after a quote is
/// also accepted and quoted regions are searched; otherwise only unquoted
/// text is searched. This keeps `color` from matching inside `bgcolor`.
#[must_use]
pub fn find_tag(text: &str, tag: &str, allow_quoted: bool) -> Option<usize> {
    if tag.is_empty() {
        return None;
    }
    let element_end = find_close_tag(text)?;
    let bytes = text.as_bytes();

    let mut from = 0;
    while from < element_end {
        let window = text.get(from..element_end)?;
        let found = from
            + if allow_quoted {
                find_ignore_case(window, tag)?
            } else {
                find_substring_outside_quotes(window, tag)?
            };
        if found == 0 {
            return Some(found);
        }
        let previous = bytes[found - 1];
        if (allow_quoted && matches!(previous, b'\'' | b'"'))
            || previous.is_ascii_whitespace()
            || previous == b';'
        {
            return Some(found);
        }
        from = found + tag.len();
    }
    None
}

/// Read the value of attribute `name` from the element at the front of `text`.
///
/// After the name, optional spaces, an `=` or `:` assignment, more spaces and
/// an opening quote are stepped over. The value then runs up to the first
/// terminator, which depends on the flags:
///
/// | `allow_quoted` | `allow_spaces` | terminators |
/// |---|---|---|
/// | yes | yes | `" ' > ;` |
/// | yes | no | space `" ' > ;` |
/// | no | yes | `" ' >` |
/// | no | no | space `" ' >` |
///
/// A value that runs into the tag's `>` has trailing spaces and a
/// self-closing `/` trimmed off. Returns the byte range of the value, or
/// `None` if the attribute is absent or empty.
///
/// # Example
/// ```
/// use sieve_html::scanner::read_attribute;
///
/// let tag = r#"<a href="index.html" class=nav>"#;
/// assert_eq!(read_attribute(tag, "href", false, false).map(|r| &tag[r]), Some("index.html"));
/// assert_eq!(read_attribute(tag, "class", false, false).map(|r| &tag[r]), Some("nav"));
/// assert_eq!(read_attribute(tag, "id", false, false), None);
/// ```
#[must_use]
pub fn read_attribute(
    text: &str,
    name: &str,
    allow_quoted: bool,
    allow_spaces: bool,
) -> Option<Range<usize>> {
    let found = find_tag(text, name, allow_quoted)?;
    let element_end = find_close_tag(text)?;
    if found >= element_end {
        return None;
    }
    let bytes = text.as_bytes();

    let mut pos = found + name.len();
    while pos < element_end && bytes[pos] == b' ' {
        pos += 1;
    }
    if pos < element_end && matches!(bytes[pos], b'=' | b':') {
        pos += 1;
    }
    while pos < element_end && bytes[pos] == b' ' {
        pos += 1;
    }
    if pos < element_end && matches!(bytes[pos], b'\'' | b'"') {
        pos += 1;
    }
    if pos >= element_end {
        return None;
    }

    let terminators: &[u8] = match (allow_quoted, allow_spaces) {
        (true, true) => b"\"'>;",
        (true, false) => b" \"'>;",
        (false, true) => b"\"'>",
        (false, false) => b" \"'>",
    };
    // the element's own '>' always terminates
    let mut end = pos
        + bytes[pos..=element_end]
            .iter()
            .position(|b| terminators.contains(b))?;

    if bytes[end] == b'>' {
        // '/' is only trimmed here because it is legal inside values such as paths
        while end - 1 > pos && matches!(bytes[end - 1], b'/' | b' ') {
            end -= 1;
        }
    }
    (end > pos).then_some(pos..end)
}

/// Owned form of [`read_attribute`]; empty when the attribute is absent.
#[must_use]
pub fn read_attribute_as_string(
    text: &str,
    name: &str,
    allow_quoted: bool,
    allow_spaces: bool,
) -> String {
    read_attribute(text, name, allow_quoted, allow_spaces)
        .map(|range| text[range].to_string())
        .unwrap_or_default()
}

/// Read an attribute as a signed decimal number.
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit. Returns `0` if the attribute is absent or not numeric; values
/// out of range saturate.
#[must_use]
pub fn read_attribute_as_long(text: &str, name: &str, allow_quoted: bool) -> i64 {
    let Some(range) = read_attribute(text, name, allow_quoted, false) else {
        return 0;
    };
    let value = text[range].trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |total, digit| {
            total
                .saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

/// The element name at the front of `text` (which starts just after `<`).
///
/// The name runs to the first whitespace or `>`; with
/// `accept_self_terminating` it also stops before a `/>`. A closing tag keeps
/// its leading `/`.
///
/// # Example
/// ```
/// use sieve_html::scanner::element_name;
///
/// assert_eq!(element_name("br/>", true), "br");
/// assert_eq!(element_name("br/>", false), "br/");
/// assert_eq!(element_name("/TD >", true), "/TD");
/// ```
#[must_use]
pub fn element_name(text: &str, accept_self_terminating: bool) -> &str {
    let bytes = text.as_bytes();
    let end = bytes
        .iter()
        .enumerate()
        .position(|(i, &b)| {
            b.is_ascii_whitespace()
                || b == b'>'
                || (accept_self_terminating && b == b'/' && bytes.get(i + 1) == Some(&b'>'))
        })
        .unwrap_or(bytes.len());
    &text[..end]
}

/// Whether `text` (which starts just after `<`) names exactly `element`,
/// compared ASCII case-insensitively.
///
/// The name must be followed by `>`, or by whitespace and attributes. With
/// `accept_self_terminating`, a following `/` also matches and whitespace is
/// accepted without further checks; otherwise a tag that turns out to be
/// self-terminated (`<br />`) does not match.
#[must_use]
pub fn compare_element(text: &str, element: &str, accept_self_terminating: bool) -> bool {
    element_matches(text, element, accept_self_terminating, <[u8]>::eq_ignore_ascii_case)
}

/// Case-sensitive form of [`compare_element`].
#[must_use]
pub fn compare_element_case_sensitive(
    text: &str,
    element: &str,
    accept_self_terminating: bool,
) -> bool {
    element_matches(text, element, accept_self_terminating, |a, b| a == b)
}

fn element_matches(
    text: &str,
    element: &str,
    accept_self_terminating: bool,
    names_equal: fn(&[u8], &[u8]) -> bool,
) -> bool {
    let bytes = text.as_bytes();
    let len = element.len();
    if len == 0 || bytes.len() < len || !names_equal(&bytes[..len], element.as_bytes()) {
        return false;
    }

    match bytes.get(len) {
        None => false,
        Some(b'>') => true,
        Some(&next) if accept_self_terminating => next == b'/' || next.is_ascii_whitespace(),
        Some(next) if next.is_ascii_whitespace() => {
            let Some(rest) = text.get(len..) else {
                return false;
            };
            find_close_tag(rest)
                .is_some_and(|close| !rest[..close].trim_end().ends_with('/'))
        }
        Some(_) => false,
    }
}

/// Find the `<` of the first `element` tag inside `section`.
///
/// Self-terminated forms (`<br/>`) are accepted.
#[must_use]
pub fn find_element(text: &str, section: Range<usize>, element: &str) -> Option<usize> {
    let mut pos = section.start;
    while pos + element.len() < section.end {
        let open = pos + text.get(pos..)?.find('<')?;
        if open + element.len() > section.end {
            return None;
        }
        if compare_element(&text[open + 1..], element, true) {
            return Some(open);
        }
        pos = open + 1;
    }
    None
}

/// Find the `<` of the `</element>` that balances the element at (or the
/// element containing) the start of `section`.
///
/// Nested elements of the same name are counted, so for
/// `<div><div>X</div></div>` the outer `</div>` is returned rather than the
/// first one. If the first tag in `section` is already the closing element it
/// is returned directly.
///
/// # Example
/// ```
/// use sieve_html::scanner::find_closing_element;
///
/// let html = "<div><div>X</div></div>";
/// assert_eq!(find_closing_element(html, 0..html.len(), "div"), Some(17));
/// ```
#[must_use]
pub fn find_closing_element(text: &str, section: Range<usize>, element: &str) -> Option<usize> {
    let len = element.len();
    if len == 0 {
        return None;
    }
    let first = section.start + text.get(section.start..)?.find('<')?;
    if first + len > section.end {
        return None;
    }

    let after = &text[first + 1..];
    let mut from = section.start;
    if compare_element(after, element, true) {
        // don't count the opening element twice
        from = first + 1 + len;
    } else if let Some(name) = after.strip_prefix('/')
        && compare_element(name, element, true)
    {
        return Some(first);
    }

    let mut depth = 1usize;
    let mut cursor = from + text[from..].find('<')?;
    while cursor + len + 1 < section.end {
        let after = &text[cursor + 1..];
        if let Some(name) = after.strip_prefix('/')
            && compare_element(name, element, true)
        {
            depth -= 1;
        } else if compare_element(after, element, true) {
            depth += 1;
        }
        if depth == 0 {
            return Some(cursor);
        }
        cursor = cursor + 1 + text[cursor + 1..].find('<')?;
    }
    None
}

/// Find the first `</element>` in `text`, compared ASCII case-insensitively.
///
/// Unlike [`find_closing_element`] this does not balance nested elements; it
/// is used for elements whose content is not markup (`script`, `style`).
#[must_use]
pub fn find_end_tag(text: &str, element: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(offset) = text.get(from..)?.find("</") {
        let open = from + offset;
        let name_start = open + 2;
        if starts_with_ignore_case(text.get(name_start..)?, element)
            && bytes.get(name_start + element.len()) == Some(&b'>')
        {
            return Some(open);
        }
        from = name_start;
    }
    None
}

/// The trimmed content of the first `element` inside `section`, up to its
/// balanced closing tag. Empty if the element is missing or never closed.
#[must_use]
pub fn read_element_as_string<'a>(text: &'a str, section: Range<usize>, element: &str) -> &'a str {
    let end = section.end;
    let Some(start) = find_element(text, section, element) else {
        return "";
    };
    let Some(closing) = find_closing_element(text, start..end, element) else {
        return "";
    };
    let Some(open_end) = find_close_tag(&text[start..]) else {
        return "";
    };
    let content_start = start + open_end + 1;
    text.get(content_start..closing).map_or("", str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_angle_brackets_are_balanced() {
        assert_eq!(find_close_tag("<a <b> c>d"), Some(8));
    }

    #[test]
    fn test_close_tag_without_leading_angle() {
        assert_eq!(find_close_tag("p class=x>"), Some(9));
    }

    #[test]
    fn test_trailing_slash_trimmed_only_at_tag_end() {
        let tag = "<img src=a/b.png/>";
        assert_eq!(
            read_attribute(tag, "src", false, false).map(|r| &tag[r]),
            Some("a/b.png")
        );
    }
}
