//! Quote-aware search primitives.
//!
//! Markup attribute values may contain `<`, `>` or anything else that looks
//! like a delimiter, so every structural search has to know whether it is
//! currently inside a quoted region. The rules are deliberately lenient:
//!
//! - a double quote always toggles the quoted state, and so can close a
//!   region that was opened by a single quote;
//! - a single quote only toggles the state when no double-quoted region is
//!   open (or when it closes a single-quoted one).
//!
//! All positions are byte offsets into the searched text. Delimiters are
//! ASCII, so every returned offset is on a character boundary.

/// Tracks the quoted state of a forward scan, one byte at a time.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct QuoteTracker {
    inside: bool,
    single: bool,
}

impl QuoteTracker {
    /// Feed the next byte of the scan.
    pub(crate) const fn update(&mut self, byte: u8) {
        match byte {
            b'"' => {
                self.inside = !self.inside;
                self.single = false;
            }
            b'\'' if !self.inside || self.single => {
                self.inside = !self.inside;
                self.single = true;
            }
            _ => {}
        }
    }

    /// Whether the scan is currently inside a quoted region.
    pub(crate) const fn is_inside(self) -> bool {
        self.inside
    }
}

/// Find the first `ch` in `text` that is not inside a quoted region.
///
/// `ch` is expected to be an ASCII delimiter such as `>` or `<`.
///
/// # Example
/// ```
/// use sieve_html::scanner::find_char_outside_quotes;
///
/// assert_eq!(find_char_outside_quotes(r#"a title="x>y">"#, b'>'), Some(13));
/// assert_eq!(find_char_outside_quotes(r#"a title="x>y"#, b'>'), None);
/// ```
#[must_use]
pub fn find_char_outside_quotes(text: &str, ch: u8) -> Option<usize> {
    let mut quotes = QuoteTracker::default();
    for (i, &byte) in text.as_bytes().iter().enumerate() {
        quotes.update(byte);
        if !quotes.is_inside() && byte == ch {
            return Some(i);
        }
    }
    None
}

/// Find the first ASCII case-insensitive occurrence of `needle` in `text`
/// that does not start inside a quoted region.
///
/// Candidates are tested at every position, so overlapping matches are never
/// skipped. An empty needle is never found.
#[must_use]
pub fn find_substring_outside_quotes(text: &str, needle: &str) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    let mut quotes = QuoteTracker::default();
    for i in 0..=haystack.len() - needle.len() {
        if !quotes.is_inside() && haystack[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            return Some(i);
        }
        quotes.update(haystack[i]);
    }
    None
}

/// Find the first ASCII case-insensitive occurrence of `needle` in `text`,
/// ignoring quotes.
#[must_use]
pub fn find_ignore_case(text: &str, needle: &str) -> Option<usize> {
    find_bytes_ignore_case(text.as_bytes(), needle.as_bytes())
}

/// Byte-slice form of [`find_ignore_case`], for input that has not been
/// decoded yet.
pub(crate) fn find_bytes_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Whether `text` begins with `prefix`, comparing ASCII letters case-insensitively.
#[must_use]
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
