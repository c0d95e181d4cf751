//! Fault-tolerant HTML to plain text extraction for Sieve.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanning** ([`scanner`]): quote-aware searches and a tag, attribute and
//!   element locator that work on byte offsets without building a tree
//! - **Decoding** ([`decoder`]): named and numeric character references,
//!   Symbol font remapping, superscript/subscript forms
//! - **Extraction** ([`extractor`]): the state machine that turns markup into
//!   whitespace-normalized text plus title, author, description, keywords
//!   and subject
//! - **Hyperlinks** ([`hyperlinks`]): anchors, images, frames, scripts, meta
//!   refreshes and links inside JavaScript string literals
//! - **Document helpers** ([`document`]): charset sniffing, `<body>` and
//!   `<style>` slicing
//!
//! Malformed markup never produces an error. Every recovery (an unknown
//! entity, an unterminated tag) is recorded in the extractor's
//! [`Diagnostics`](sieve_common::warning::Diagnostics).
//!
//! # Not Implemented
//!
//! - Encoding conversion (the input is already a `&str`)
//! - DOM construction, CSS or layout
//!
//! # Example
//! ```
//! use sieve_html::{ExtractOptions, HtmlExtractor};
//!
//! let mut extractor = HtmlExtractor::new();
//! let text = extractor.extract("<td>A</td><td>B</td>", ExtractOptions::default());
//! assert_eq!(text, Some("\tA\tB"));
//! ```

/// Character reference and glyph decoding.
pub mod decoder;
/// Charset sniffing and section helpers.
pub mod document;
/// HTML to plain text extraction.
pub mod extractor;
/// Hyperlink discovery and removal.
pub mod hyperlinks;
/// Quote-aware scanning and element location.
pub mod scanner;

pub use document::{body_section, parse_charset, style_section};
pub use extractor::{Element, ExtractOptions, ExtractedDocument, HtmlExtractor};
pub use hyperlinks::{
    Hyperlink, HyperlinkParser, ImageParser, JavascriptLinks, LinkKind, find_bookmark,
    strip_hyperlinks,
};
