//! Links hidden in JavaScript string literals.

/// Iterator over double-quoted string literals in a script body that look
/// like links to files.
///
/// A literal qualifies when it is at least six characters long, has a `.`
/// four or five characters from its end (a three or four letter file
/// extension), and contains only characters that are legal in a URI.
///
/// # Example
/// ```
/// use sieve_html::hyperlinks::JavascriptLinks;
///
/// let script = r#"var a = "menu.html"; var b = "not a link"; load("img/logo.png");"#;
/// let links: Vec<_> = JavascriptLinks::new(script).collect();
/// assert_eq!(links, ["menu.html", "img/logo.png"]);
/// ```
#[derive(Debug, Clone)]
pub struct JavascriptLinks<'a> {
    script: &'a str,
    pos: usize,
}

impl<'a> JavascriptLinks<'a> {
    /// Scan `script`, typically the body of a `<script>` element.
    #[must_use]
    pub const fn new(script: &'a str) -> Self {
        Self { script, pos: 0 }
    }
}

impl<'a> Iterator for JavascriptLinks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let open = self.pos + self.script.get(self.pos..)?.find('"')?;
            let start = open + 1;
            let close = start + self.script[start..].find('"')?;
            self.pos = close + 1;

            let literal = &self.script[start..close];
            if looks_like_file_link(literal) {
                return Some(literal);
            }
        }
    }
}

fn looks_like_file_link(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let len = bytes.len();
    len >= 6
        && (bytes[len - 4] == b'.' || bytes[len - 5] == b'.')
        && bytes.iter().all(|&b| is_uri_char(b))
}

/// Unreserved and reserved URI characters, plus `%` for escapes.
const fn is_uri_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b':'
                | b'/'
                | b'?'
                | b'#'
                | b'['
                | b']'
                | b'@'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b'%'
        )
}
