//! Integration tests for the quote-aware scanner and element locator.

use sieve_html::scanner::{
    compare_element, compare_element_case_sensitive, element_name, find_char_outside_quotes,
    find_close_tag, find_closing_element, find_element, find_end_tag, find_ignore_case,
    find_substring_outside_quotes, find_tag, read_attribute, read_attribute_as_long,
    read_attribute_as_string, read_element_as_string, starts_with_ignore_case,
};

/// Helper to read an attribute value as a slice
fn attr<'a>(tag: &'a str, name: &str, allow_quoted: bool, allow_spaces: bool) -> Option<&'a str> {
    read_attribute(tag, name, allow_quoted, allow_spaces).map(|range| &tag[range])
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn test_find_char_outside_quotes() {
    assert_eq!(find_char_outside_quotes(r#"a="x>y">"#, b'>'), Some(7));
    assert_eq!(find_char_outside_quotes("a='x>y'>", b'>'), Some(7));
    assert_eq!(find_char_outside_quotes("no delimiter", b'>'), None);
}

#[test]
fn test_find_substring_outside_quotes() {
    assert_eq!(find_substring_outside_quotes(r#"title="src" src=x"#, "src"), Some(12));
    assert_eq!(find_substring_outside_quotes(r#"title="src" SRC=x"#, "src"), Some(12));
    assert_eq!(find_substring_outside_quotes(r#"title="src""#, "src"), None);
}

#[test]
fn test_case_insensitive_helpers() {
    assert_eq!(find_ignore_case("Hello World", "WORLD"), Some(6));
    assert!(starts_with_ignore_case("CDATA[", "cdata"));
    assert!(!starts_with_ignore_case("CD", "cdata"));
}

// ============================================================================
// Tags and attributes
// ============================================================================

#[test]
fn test_find_close_tag_skips_quoted_apostrophe() {
    assert_eq!(find_close_tag(r#"<a title="it's">x"#), Some(15));
}

#[test]
fn test_find_close_tag_unterminated() {
    assert_eq!(find_close_tag("<b text<i>y</i>"), None);
    assert_eq!(find_close_tag(""), None);
}

#[test]
fn test_find_tag_matches_whole_tokens() {
    let tag = "<td bgcolor=red color=blue>";
    assert_eq!(find_tag(tag, "color", false), Some(16));
    assert_eq!(attr(tag, "color", false, false), Some("blue"));
    assert_eq!(attr(tag, "bgcolor", false, false), Some("red"));
}

#[test]
fn test_find_tag_stays_inside_element() {
    assert_eq!(find_tag("<p>x <b class=y>", "class", false), None);
}

#[test]
fn test_attribute_spaces() {
    let tag = r#"<meta content="a b c">"#;
    assert_eq!(attr(tag, "content", false, true), Some("a b c"));
    assert_eq!(attr(tag, "content", false, false), Some("a"));
}

#[test]
fn test_attribute_inside_style() {
    let tag = r#"<p style="color: red; font-size: 2em">"#;
    assert_eq!(attr(tag, "color", true, false), Some("red"));
    assert_eq!(attr(tag, "font-size", true, false), Some("2em"));
    // without quoted search the style value is invisible
    assert_eq!(attr(tag, "font-size", false, false), None);
}

#[test]
fn test_attribute_single_quotes_and_spacing() {
    let tag = "<a href = 'page.html' >";
    assert_eq!(attr(tag, "href", false, false), Some("page.html"));
}

#[test]
fn test_missing_or_empty_attribute() {
    assert_eq!(attr(r#"<a href="">"#, "href", false, false), None);
    assert_eq!(attr("<a>", "href", false, false), None);
    assert_eq!(read_attribute_as_string("<a>", "href", false, false), "");
    assert_eq!(
        read_attribute_as_string(r#"<a href="x.html">"#, "href", false, false),
        "x.html"
    );
}

#[test]
fn test_read_attribute_as_long() {
    assert_eq!(read_attribute_as_long(r#"<td colspan="3">"#, "colspan", false), 3);
    assert_eq!(read_attribute_as_long("<td width=-42px>", "width", false), -42);
    assert_eq!(read_attribute_as_long(r#"<td colspan="x">"#, "colspan", false), 0);
    assert_eq!(read_attribute_as_long("<td>", "colspan", false), 0);
}

// ============================================================================
// Elements
// ============================================================================

#[test]
fn test_element_name() {
    assert_eq!(element_name("/div>", true), "/div");
    assert_eq!(element_name("p\tclass=x>", true), "p");
    assert_eq!(element_name("img", true), "img");
}

#[test]
fn test_compare_element() {
    assert!(compare_element("br>", "br", false));
    assert!(compare_element("BR>", "br", false));
    assert!(compare_element("br/>", "br", true));
    assert!(!compare_element("br />", "br", false));
    assert!(compare_element("br />", "br", true));
    assert!(compare_element(r#"a href="x">"#, "a", false));
    assert!(!compare_element("bra>", "br", true));
    assert!(!compare_element("br", "br", true));
}

#[test]
fn test_compare_element_case_sensitive() {
    assert!(compare_element_case_sensitive("br>", "br", false));
    assert!(!compare_element_case_sensitive("BR>", "br", false));
}

#[test]
fn test_find_element() {
    let html = "<p>x</p><br/><b>";
    assert_eq!(find_element(html, 0..html.len(), "br"), Some(8));
    assert_eq!(find_element(html, 0..5, "br"), None);
    assert_eq!(find_element(html, 0..html.len(), "i"), None);
}

#[test]
fn test_find_closing_element_balances_nesting() {
    let html = "<div><div>X</div></div>";
    assert_eq!(find_closing_element(html, 0..html.len(), "div"), Some(17));
}

#[test]
fn test_find_closing_element_from_inside() {
    let html = "x</div>";
    assert_eq!(find_closing_element(html, 0..html.len(), "div"), Some(1));
}

#[test]
fn test_find_closing_element_unbalanced() {
    let html = "<div><div>X</div>";
    assert_eq!(find_closing_element(html, 0..html.len(), "div"), None);
}

#[test]
fn test_find_end_tag() {
    let html = "<script>if (a</b) x</SCRIPT>";
    assert_eq!(find_end_tag(html, "script"), Some(19));
    assert_eq!(find_end_tag(html, "style"), None);
}

#[test]
fn test_read_element_as_string() {
    let html = "<ul><li>a</li></ul><p> Hello <b>there</b> </p>";
    assert_eq!(
        read_element_as_string(html, 0..html.len(), "p"),
        "Hello <b>there</b>"
    );
    assert_eq!(read_element_as_string(html, 0..html.len(), "table"), "");
    assert_eq!(read_element_as_string("<p>never closed", 0..15, "p"), "");
}
