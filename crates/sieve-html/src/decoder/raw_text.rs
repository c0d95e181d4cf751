//! Decoding of the literal text between tags.
//!
//! A span handed to [`decode_raw_text`] contains no tags, only text with
//! character references, `${...}` template placeholders and line endings.
//! Decoded characters are appended to the caller's output buffer and every
//! recovered anomaly is recorded in the caller's diagnostics.

use std::ops::Range;

use sieve_common::warning::Diagnostics;

use super::named_character_references::{SOFT_HYPHEN, lookup_entity};
use super::numeric::{NumericReference, decode_numeric_reference};
use super::script_forms::{to_subscript, to_superscript};

/// Diagnostic component for character reference problems.
const COMPONENT: &str = "entity";

/// Emitted in place of a well-formed reference to an unknown entity name.
pub const UNKNOWN_ENTITY: char = '?';

/// Nesting depths of the elements that change how literal text is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMode {
    /// Open `<pre>` elements. Line endings are kept while this is nonzero.
    pub preformatted_depth: u32,
    /// Open `<sup>` elements.
    pub superscript_depth: u32,
    /// Open `<sub>` elements.
    pub subscript_depth: u32,
}

impl TextMode {
    /// Whether line endings are copied verbatim.
    #[must_use]
    pub const fn is_preformatted(self) -> bool {
        self.preformatted_depth > 0
    }
}

/// Decode `span` and append the result to `out`.
///
/// - Outside preformatted text, each run of CR/LF characters becomes a
///   single space.
/// - `&` starts a character reference (see below).
/// - `${...}` is dropped; an unmatched `${` or a lone `$` is kept.
/// - While a superscript (or else subscript) depth is set, literal characters
///   are transliterated to their superscript (subscript) forms.
///
/// Character references are terminated by `;`, `<`, whitespace or the end of
/// the span. A non-`;` terminator is kept in the output after the decoded
/// character. A bare `&` before whitespace becomes `"& "`, consuming that
/// whitespace. Malformed references never fail: an unknown name followed by
/// `;` decodes to `?`, an unknown name without `;` is copied literally, and a
/// doubly-escaped `&amp;le;` decodes as `≤`. Each case is logged to `log`.
///
/// # Example
/// ```
/// use sieve_common::warning::Diagnostics;
/// use sieve_html::decoder::{TextMode, decode_raw_text};
///
/// let mut out = String::new();
/// let mut log = Diagnostics::new();
/// decode_raw_text("Fish &amp; chips\r\nfor &pound;5", TextMode::default(), &mut out, &mut log);
/// assert_eq!(out, "Fish & chips for £5");
/// assert!(log.is_empty());
/// ```
pub fn decode_raw_text(span: &str, mode: TextMode, out: &mut String, log: &mut Diagnostics) {
    RawTextDecoder {
        span,
        mode,
        out,
        log,
    }
    .run();
}

struct RawTextDecoder<'s, 'o> {
    span: &'s str,
    mode: TextMode,
    out: &'o mut String,
    log: &'o mut Diagnostics,
}

impl RawTextDecoder<'_, '_> {
    fn run(&mut self) {
        let bytes = self.span.as_bytes();
        let preformatted = self.mode.is_preformatted();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'&' => {
                    self.push_literal(literal_start..i);
                    i = self.decode_reference(i);
                    literal_start = i;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    if let Some(close) = self.span[i + 2..].find('}') {
                        self.push_literal(literal_start..i);
                        i += 2 + close + 1;
                        literal_start = i;
                    } else {
                        i += 1;
                    }
                }
                b'\r' | b'\n' if !preformatted => {
                    self.push_literal(literal_start..i);
                    self.out.push(' ');
                    while i < bytes.len() && matches!(bytes[i], b'\r' | b'\n') {
                        i += 1;
                    }
                    literal_start = i;
                }
                _ => i += 1,
            }
        }
        self.push_literal(literal_start..bytes.len());
    }

    /// Copy a literal run, transliterating inside `<sup>`/`<sub>`.
    fn push_literal(&mut self, range: Range<usize>) {
        let text = &self.span[range];
        if self.mode.superscript_depth > 0 {
            self.out.extend(text.chars().map(to_superscript));
        } else if self.mode.subscript_depth > 0 {
            self.out.extend(text.chars().map(to_subscript));
        } else {
            self.out.push_str(text);
        }
    }

    /// Decode the reference whose `&` is at `amp`; returns where scanning resumes.
    fn decode_reference(&mut self, amp: usize) -> usize {
        let span = self.span;
        let bytes = span.as_bytes();
        let name_start = amp + 1;
        let name_end = bytes[name_start..]
            .iter()
            .position(|b| matches!(b, b';' | b'<' | b' ' | b'\t' | b'\n' | b'\r'))
            .map_or(bytes.len(), |p| name_start + p);
        let has_semicolon = bytes.get(name_end) == Some(&b';');
        let resume = if has_semicolon { name_end + 1 } else { name_end };

        if name_end == name_start {
            self.log.push(COMPONENT, "Unencoded ampersand in text");
            match bytes.get(name_start) {
                Some(b'\r') if bytes.get(name_start + 1) == Some(&b'\n') => {
                    self.out.push_str("& ");
                    return name_start + 2;
                }
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.out.push_str("& ");
                    return name_start + 1;
                }
                _ => {}
            }
            self.out.push('&');
            return name_start;
        }

        let name = &span[name_start..name_end];
        if let Some(digits) = name.strip_prefix('#') {
            match decode_numeric_reference(digits) {
                NumericReference::Char(ch) => self.out.push(ch),
                NumericReference::Ligature(letters) => self.out.push_str(letters),
                NumericReference::SoftHyphen => {}
                NumericReference::Invalid => {
                    self.log.push(
                        COMPONENT,
                        format!("Invalid numeric HTML entity: {}", &span[amp..resume]),
                    );
                    return resume;
                }
            }
            if !has_semicolon {
                self.log.push(
                    COMPONENT,
                    format!("Missing semicolon on HTML entity: {}", &span[amp..name_end]),
                );
            }
            return resume;
        }

        match lookup_entity(name) {
            Some(SOFT_HYPHEN) => {}
            Some('&') if has_semicolon => {
                if let Some(next) = self.decode_double_encoded(amp, resume) {
                    return next;
                }
                self.out.push('&');
            }
            Some(ch) => {
                self.out.push(ch);
                if !has_semicolon {
                    self.log.push(
                        COMPONENT,
                        format!("Missing semicolon on HTML entity: {}", &span[amp..name_end]),
                    );
                }
            }
            None if has_semicolon => {
                self.out.push(UNKNOWN_ENTITY);
                self.log.push(
                    COMPONENT,
                    format!("Unknown HTML entity: {}", &span[amp..name_end]),
                );
            }
            None => {
                // most likely an unencoded '&' with a word right after it
                self.log.push(
                    COMPONENT,
                    format!(
                        "Unencoded ampersand or unknown HTML entity: {}",
                        &span[amp..name_end]
                    ),
                );
                self.push_literal(amp..name_end);
            }
        }
        resume
    }

    /// Handle `&amp;le;`, an `&le;` whose ampersand was escaped a second time.
    ///
    /// `from` is just past `&amp;`. If a known entity name follows up to the
    /// next `;`, its character is emitted and the position after that `;` is
    /// returned.
    fn decode_double_encoded(&mut self, amp: usize, from: usize) -> Option<usize> {
        let bytes = self.span.as_bytes();
        let end = from
            + bytes[from..]
                .iter()
                .position(|b| b.is_ascii_whitespace() || *b == b';')?;
        if bytes[end] != b';' {
            return None;
        }
        let ch = lookup_entity(&self.span[from..end])?;
        self.log.push(
            COMPONENT,
            format!(
                "Ampersand incorrectly encoded in HTML entity: {}",
                &self.span[amp..=end]
            ),
        );
        self.out.push(ch);
        Some(end + 1)
    }
}
