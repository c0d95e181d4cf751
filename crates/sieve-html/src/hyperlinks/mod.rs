//! Hyperlink discovery and removal.
//!
//! The parsers here yield links exactly as written in the markup. Turning
//! them into absolute URLs is the job of
//! [`sieve_common::url::UrlResolver`].

/// Document-wide link iterator.
pub mod anchors;
/// Bookmark lookup and hyperlink stripping.
pub mod bookmarks;
/// `<img>` source iterator.
pub mod images;
/// Links inside JavaScript string literals.
pub mod javascript;

pub use anchors::{Hyperlink, HyperlinkParser, LinkKind};
pub use bookmarks::{find_bookmark, strip_hyperlinks};
pub use images::ImageParser;
pub use javascript::JavascriptLinks;
