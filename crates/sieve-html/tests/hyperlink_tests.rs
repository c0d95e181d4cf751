//! Integration tests for hyperlink discovery, image lists, bookmarks and
//! hyperlink stripping.

use sieve_html::hyperlinks::{
    HyperlinkParser, ImageParser, LinkKind, find_bookmark, strip_hyperlinks,
};

/// Helper to collect `(url, kind)` pairs from a document
fn links(html: &str, include_image_links: bool) -> Vec<(&str, LinkKind)> {
    HyperlinkParser::new(html, include_image_links)
        .map(|link| (link.url, link.kind))
        .collect()
}

// ============================================================================
// HyperlinkParser
// ============================================================================

#[test]
fn test_anchor_link_and_area() {
    let html = r#"<link rel="stylesheet" href="style.css"><a href="faq.html">FAQ</a><area shape="rect" href="map.html">"#;
    assert_eq!(
        links(html, false),
        [
            ("style.css", LinkKind::Plain),
            ("faq.html", LinkKind::Plain),
            ("map.html", LinkKind::Plain),
        ]
    );
}

#[test]
fn test_images_only_when_requested() {
    let html = r#"<img src="a.png"><a href="b.html">b</a>"#;
    assert_eq!(links(html, false), [("b.html", LinkKind::Plain)]);
    assert_eq!(
        links(html, true),
        [("a.png", LinkKind::Image), ("b.html", LinkKind::Plain)]
    );
}

#[test]
fn test_frames() {
    let html = r#"<frameset><frame src="top.html"><iframe src="ad.html"></iframe></frameset>"#;
    assert_eq!(
        links(html, false),
        [("top.html", LinkKind::Plain), ("ad.html", LinkKind::Plain)]
    );
}

#[test]
fn test_anchors_without_href_are_skipped() {
    let html = r#"<a name="top"></a><a href="next.html">next</a>"#;
    assert_eq!(links(html, false), [("next.html", LinkKind::Plain)]);
}

#[test]
fn test_meta_refresh() {
    let html = r#"<meta name="author" content="x"><meta http-equiv="refresh" content="5; url=next.html">"#;
    assert_eq!(links(html, false), [("next.html", LinkKind::Plain)]);
}

#[test]
fn test_script_source_then_literals() {
    let html = r#"<script src="app.js"></script><script>var u = "menu.html";</script><a href="x.html">x</a>"#;
    assert_eq!(
        links(html, false),
        [
            ("app.js", LinkKind::Script),
            ("menu.html", LinkKind::Plain),
            ("x.html", LinkKind::Plain),
        ]
    );
}

#[test]
fn test_script_body_is_not_read_as_markup() {
    let html = r#"<script>document.write("<a href='ad.html'>");</script><a href="real.html">r</a>"#;
    assert_eq!(links(html, false), [("real.html", LinkKind::Plain)]);
}

#[test]
fn test_base_url() {
    let html = r#"<html><head><base href="https://example.com/docs/"></head><body><a href="page.html">p</a>"#;
    let parser = HyperlinkParser::new(html, false);
    assert_eq!(parser.base_url(), Some("https://example.com/docs/"));
    assert_eq!(
        parser.map(|link| link.url).collect::<Vec<_>>(),
        ["page.html"]
    );
}

#[test]
fn test_no_links() {
    assert!(links("<p>plain <b>text</b></p>", true).is_empty());
    assert!(links("", true).is_empty());
    assert!(links("trailing <", true).is_empty());
}

#[test]
fn test_link_kind_names() {
    assert_eq!(LinkKind::Image.to_string(), "image");
    assert_eq!("SCRIPT".parse::<LinkKind>().ok(), Some(LinkKind::Script));
}

// ============================================================================
// ImageParser
// ============================================================================

#[test]
fn test_image_parser_skips_lookalikes() {
    let html = r#"<image src="x.png"><IMG SRC="a.png" /><img alt="none"><img src=b.gif>"#;
    assert_eq!(ImageParser::new(html).collect::<Vec<_>>(), ["a.png", "b.gif"]);
}

// ============================================================================
// Bookmarks and stripping
// ============================================================================

#[test]
fn test_find_bookmark_walks_anchors() {
    let html = r#"<a name="one">1</a><a href="x">x</a><a name="two">2</a>"#;
    assert_eq!(find_bookmark(html, 0..html.len()), Some((0, "one")));
    assert_eq!(find_bookmark(html, 1..html.len()), Some((36, "two")));
    assert_eq!(find_bookmark(html, 37..html.len()), None);
}

#[test]
fn test_strip_multiple_links() {
    let html = r#"<p><a href="1.html">One</a> and <A HREF="2.html">Two</A></p>"#;
    assert_eq!(strip_hyperlinks(html), "<p>One and Two</p>");
}

#[test]
fn test_strip_leaves_other_a_elements() {
    assert_eq!(strip_hyperlinks("<abbr>x</abbr>"), "<abbr>x</abbr>");
    assert_eq!(
        strip_hyperlinks(r#"<a name="keep">k</a>"#),
        r#"<a name="keep">k</a>"#
    );
    assert_eq!(strip_hyperlinks(""), "");
}
