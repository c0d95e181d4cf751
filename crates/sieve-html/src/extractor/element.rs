//! Elements the extractor dispatches on.

use strum_macros::{AsRefStr, Display, EnumString};

/// An element name with special handling during extraction.
///
/// Parsing is ASCII case-insensitive, so `"DIV".parse::<Element>()` yields
/// [`Element::Div`]. Names not listed here are consumed as plain boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum Element {
    // Skipped verbatim
    Script,
    Style,
    Noscript,
    Annotation,
    #[strum(serialize = "annotation-xml")]
    AnnotationXml,

    // Metadata
    Meta,
    Title,
    Subject,

    // Text modes
    Font,
    Pre,
    Sup,
    Sub,

    // Inline emitters
    Br,
    Li,
    Td,
    Dd,
    A,
    Span,

    // Paragraph breakers
    Button,
    Div,
    Dl,
    Dt,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Hr,
    Input,
    Ol,
    Option,
    P,
    Select,
    Table,
    Tr,
    Ul,
}

impl Element {
    /// Parse an element name view, as produced by
    /// [`element_name`](crate::scanner::element_name) without the closing `/`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Whether the element's body is skipped without extracting text.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        matches!(
            self,
            Self::Script | Self::Style | Self::Noscript | Self::Annotation | Self::AnnotationXml
        )
    }

    /// Whether opening the element starts a new paragraph.
    #[must_use]
    pub const fn breaks_paragraph(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Div
                | Self::Dl
                | Self::Dt
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Hr
                | Self::Input
                | Self::Ol
                | Self::Option
                | Self::P
                | Self::Select
                | Self::Table
                | Self::Tr
                | Self::Ul
        )
    }

    /// Whether closing the element ends a paragraph.
    ///
    /// Rows, definition terms and options are followed by more content of
    /// the same group, so their closing tags emit nothing.
    #[must_use]
    pub const fn closing_breaks_paragraph(self) -> bool {
        self.breaks_paragraph() && !matches!(self, Self::Tr | Self::Dt | Self::Option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Element::from_name("DIV"), Some(Element::Div));
        assert_eq!(Element::from_name("Annotation-XML"), Some(Element::AnnotationXml));
        assert_eq!(Element::from_name("blink"), None);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Element::H1.to_string(), "h1");
        assert_eq!(Element::AnnotationXml.as_ref(), "annotation-xml");
    }

    #[test]
    fn test_closing_rows_do_not_break() {
        assert!(Element::Tr.breaks_paragraph());
        assert!(!Element::Tr.closing_breaks_paragraph());
        assert!(Element::Table.closing_breaks_paragraph());
        assert!(!Element::Span.breaks_paragraph());
    }
}
