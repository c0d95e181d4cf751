//! Whole-document helpers: charset sniffing and section slicing.

use crate::scanner::find_ignore_case;
use crate::scanner::primitives::find_bytes_ignore_case;

/// Characters that end a charset label.
const LABEL_TERMINATORS: &[u8] = b" '\"/>";

/// Find the character set a page declares for itself.
///
/// Looks, in order, at:
/// 1. the first `<meta>` with both `content-type` and ` content=` before its
///    `>`, taking the value after `charset=` (or after `;`);
/// 2. an HTML5 `<meta charset=...>`;
/// 3. the `encoding` of an `<?xml ...?>` prolog, when the page has no
///    `<meta>` at all.
///
/// The label is returned exactly as written; no encoding conversion is done.
///
/// # Example
/// ```
/// use sieve_html::document::parse_charset;
///
/// let page = br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
/// assert_eq!(parse_charset(page).as_deref(), Some("windows-1252"));
/// assert_eq!(parse_charset(b"<meta charset=\"utf-8\">").as_deref(), Some("utf-8"));
/// assert_eq!(parse_charset(b"<p>plain</p>"), None);
/// ```
#[must_use]
pub fn parse_charset(page: &[u8]) -> Option<String> {
    let label = match find_bytes_ignore_case(page, b"<meta") {
        Some(first_meta) => {
            content_type_charset(page, first_meta).or_else(|| html5_meta_charset(page))
        }
        None => xml_encoding(page),
    };
    label
        .filter(|label| !label.is_empty())
        .map(|label| String::from_utf8_lossy(label).into_owned())
}

fn content_type_charset(page: &[u8], first_meta: usize) -> Option<&[u8]> {
    let mut start = first_meta;
    let content = loop {
        let rest = &page[start..];
        let angle = rest.iter().position(|&b| b == b'>')?;
        let content_type = find_bytes_ignore_case(rest, b"content-type")?;
        let content = find_bytes_ignore_case(rest, b" content=")?;
        if content_type < angle && content < angle {
            break start + content;
        }
        let after_tag = start + angle;
        start = after_tag + find_bytes_ignore_case(&page[after_tag..], b"<meta")?;
    };

    let mut value_start = content + b" content=".len();
    if matches!(page.get(value_start), Some(b'"' | b'\'')) {
        value_start += 1;
    }
    let rest = &page[value_start..];
    let angle = rest.iter().position(|&b| b == b'>');
    let self_closing = find_bytes_ignore_case(rest, b"/>");
    let tag_end = match (angle, self_closing) {
        (Some(a), Some(s)) => a.min(s),
        (a, s) => a.or(s)?,
    };

    let section = &rest[..tag_end];
    let value = if let Some(found) = find_bytes_ignore_case(section, b"charset=") {
        &section[found + b"charset=".len()..]
    } else {
        let semicolon = section.iter().position(|&b| b == b';')?;
        &section[semicolon + 1..]
    };
    Some(read_label(value))
}

fn html5_meta_charset(page: &[u8]) -> Option<&[u8]> {
    let found = find_bytes_ignore_case(page, b"<meta charset=")?;
    let value = &page[found + b"<meta charset=".len()..];
    let value = value.strip_prefix(b"\"").unwrap_or(value);
    Some(read_label(value))
}

fn xml_encoding(page: &[u8]) -> Option<&[u8]> {
    if !page.starts_with(b"<?xml") {
        return None;
    }
    let marker = b"encoding=\"";
    let start = page.windows(marker.len()).position(|w| w == marker)? + marker.len();
    let len = page[start..].iter().position(|&b| b == b'"')?;
    Some(&page[start..start + len])
}

/// Skip leading spaces and single quotes, then read up to a terminator.
fn read_label(value: &[u8]) -> &[u8] {
    let skip = value
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\'')
        .count();
    let value = &value[skip..];
    let len = value
        .iter()
        .position(|b| LABEL_TERMINATORS.contains(b))
        .unwrap_or(value.len());
    &value[..len]
}

/// The content of the `<body>` element.
///
/// The whole text is returned when there is no `<body>`, when its start tag
/// is never closed, or when there is no `</body>`.
#[must_use]
pub fn body_section(text: &str) -> &str {
    let Some(body) = find_ignore_case(text, "<body") else {
        return text;
    };
    let Some(open_end) = text[body..].find('>') else {
        return text;
    };
    let content_start = body + open_end + 1;
    find_ignore_case(&text[content_start..], "</body>")
        .map_or(text, |len| &text[content_start..content_start + len])
}

/// The trimmed content of the first `<style>` element, without a wrapping
/// `<!-- ... -->`. Empty when there is no complete style element.
///
/// # Example
/// ```
/// use sieve_html::document::style_section;
///
/// let html = "<style>\n<!--\np { color: red }\n-->\n</style>";
/// assert_eq!(style_section(html), "p { color: red }");
/// ```
#[must_use]
pub fn style_section(text: &str) -> &str {
    let Some(style) = find_ignore_case(text, "<style") else {
        return "";
    };
    let Some(open_end) = text[style..].find('>') else {
        return "";
    };
    let content_start = style + open_end + 1;
    let Some(len) = find_ignore_case(&text[content_start..], "</style>") else {
        return "";
    };

    let mut css = text[content_start..content_start + len].trim();
    if css.len() > 4
        && let Some(rest) = css.strip_prefix("<!--")
    {
        css = rest;
    }
    if css.len() > 3
        && let Some(rest) = css.strip_suffix("-->")
    {
        css = rest;
    }
    css.trim()
}
