use crate::scanner::{find_element, read_attribute};

/// Iterator over the `src` of every `<img>` element.
///
/// Unlike [`HyperlinkParser`](super::HyperlinkParser) this looks at images
/// only, including self-closed `<img/>` forms, and skips images without a
/// source.
///
/// # Example
/// ```
/// use sieve_html::hyperlinks::ImageParser;
///
/// let html = r#"<p><img src="a.png"/><img alt="none"><IMG SRC=b.gif></p>"#;
/// assert_eq!(ImageParser::new(html).collect::<Vec<_>>(), ["a.png", "b.gif"]);
/// ```
#[derive(Debug, Clone)]
pub struct ImageParser<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> ImageParser<'a> {
    /// Scan `html` from the start.
    #[must_use]
    pub const fn new(html: &'a str) -> Self {
        Self { html, pos: 0 }
    }
}

impl<'a> Iterator for ImageParser<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let image = find_element(self.html, self.pos..self.html.len(), "img")?;
            let tag = &self.html[image..];
            match read_attribute(tag, "src", false, true) {
                Some(range) => {
                    self.pos = image + range.end;
                    return Some(&tag[range]);
                }
                None => self.pos = image + "<img".len(),
            }
        }
    }
}
