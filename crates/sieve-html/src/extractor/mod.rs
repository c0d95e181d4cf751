//! HTML to plain text extraction.

/// The extraction state machine.
pub mod engine;
/// Elements with special handling.
pub mod element;

pub use engine::{ExtractOptions, ExtractedDocument, HtmlExtractor};
pub use element::Element;
