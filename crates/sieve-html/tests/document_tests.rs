//! Integration tests for charset sniffing and section slicing.

use sieve_html::document::{body_section, parse_charset, style_section};

/// Helper to sniff a charset from a string literal
fn charset(page: &str) -> Option<String> {
    parse_charset(page.as_bytes())
}

// ============================================================================
// parse_charset
// ============================================================================

#[test]
fn test_unquoted_content_type() {
    let page = "<META http-equiv=Content-Type content=text/html;charset=utf-8>";
    assert_eq!(charset(page).as_deref(), Some("utf-8"));
}

#[test]
fn test_label_after_semicolon_without_charset_key() {
    let page = r#"<meta http-equiv="content-type" content="text/html; iso-8859-1">"#;
    assert_eq!(charset(page).as_deref(), Some("iso-8859-1"));
}

#[test]
fn test_html5_meta_charset_single_quoted() {
    assert_eq!(charset("<meta charset='latin1'>").as_deref(), Some("latin1"));
}

#[test]
fn test_empty_label_is_absent() {
    assert_eq!(charset(r#"<meta charset="">"#), None);
}

#[test]
fn test_xml_prolog_ignored_when_meta_present() {
    let page = r#"<?xml version="1.0" encoding="UTF-16"?><meta name="x">"#;
    assert_eq!(charset(page), None);
}

#[test]
fn test_invalid_utf8_bytes_do_not_matter() {
    let mut page = b"<p>\xff\xfe</p>".to_vec();
    page.extend_from_slice(br#"<meta charset="koi8-r">"#);
    assert_eq!(parse_charset(&page).as_deref(), Some("koi8-r"));
}

// ============================================================================
// Sections
// ============================================================================

#[test]
fn test_body_section() {
    let html = "<html><body>\n<p>x</p>\n</body></html>";
    assert_eq!(body_section(html), "\n<p>x</p>\n");
    assert_eq!(body_section("<body>never closed"), "<body>never closed");
}

#[test]
fn test_style_section() {
    assert_eq!(style_section("<STYLE type=text/css> h1 {} </STYLE>"), "h1 {}");
    assert_eq!(style_section("<style>p {}"), "");
    assert_eq!(style_section("<p>no style</p>"), "");
}
