//! Tests for relative link resolution and domain decomposition.

use sieve_common::url::{
    DomainParts, UrlResolver, image_name_from_url, is_absolute_url, is_top_level_domain_url,
    top_level_domain_from_url,
};

/// Helper to resolve a single path against a root URL.
fn resolve(root: &str, path: &str) -> Option<String> {
    let mut resolver = UrlResolver::new(root);
    resolver.resolve(path, false).map(str::to_string)
}

// ========================================================================
// Resolution
// ========================================================================

#[test]
fn test_parent_relative() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "../z.html").as_deref(),
        Some("http://a.com/z.html")
    );
}

#[test]
fn test_parent_relative_never_walks_past_protocol() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "../../z.html").as_deref(),
        Some("http://a.com/z.html")
    );
    assert_eq!(
        resolve("http://a.com/x/y.html", "../../../../z.html").as_deref(),
        Some("http://a.com/z.html")
    );
}

#[test]
fn test_parent_relative_with_non_ascii_host() {
    assert_eq!(
        resolve("http://é.com/x/y.html", "../../z.html").as_deref(),
        Some("http://é.com/z.html")
    );
    assert_eq!(
        resolve("http://é.com/x/y.html", "../../../../z.html").as_deref(),
        Some("http://é.com/z.html")
    );
}

#[test]
fn test_current_directory_relative() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "./z.html").as_deref(),
        Some("http://a.com/x/z.html")
    );
}

#[test]
fn test_root_relative() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "/abs.html").as_deref(),
        Some("http://a.com/abs.html")
    );
}

#[test]
fn test_plain_relative() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "z.html").as_deref(),
        Some("http://a.com/x/z.html")
    );
}

#[test]
fn test_plain_relative_against_bare_domain() {
    assert_eq!(
        resolve("http://a.com", "z.html").as_deref(),
        Some("http://a.com/z.html")
    );
}

#[test]
fn test_absolute_link_is_kept() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "https://other.org/p").as_deref(),
        Some("https://other.org/p")
    );
    assert_eq!(
        resolve("http://a.com/x/y.html", "mailto:me@a.com").as_deref(),
        Some("mailto:me@a.com")
    );
}

#[test]
fn test_query_only_link() {
    assert_eq!(
        resolve("http://a.com/list.php?page=1", "?page=2").as_deref(),
        Some("http://a.com/list.php?page=2")
    );
}

#[test]
fn test_bookmark_is_stripped() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "page.html#top").as_deref(),
        Some("http://a.com/x/page.html")
    );
}

#[test]
fn test_spaces_are_encoded() {
    assert_eq!(
        resolve("http://a.com/x/y.html", "my file.html").as_deref(),
        Some("http://a.com/x/my%20file.html")
    );
}

#[test]
fn test_empty_path_is_absent() {
    assert_eq!(resolve("http://a.com/x/y.html", ""), None);
}

#[test]
fn test_image_directory_gets_image_name() {
    let mut resolver = UrlResolver::new("http://mysite.com/gallery.php?image=cat.jpg");
    assert!(resolver.has_query());
    assert_eq!(resolver.image_name(), "cat.jpg");
    assert_eq!(
        resolver.resolve("photos/", true),
        Some("http://mysite.com/photos/cat.jpg")
    );
    // not an image, so the directory is left alone
    assert_eq!(
        resolver.resolve("photos/", false),
        Some("http://mysite.com/photos/")
    );
}

#[test]
fn test_resolver_tracks_current_domain() {
    let mut resolver = UrlResolver::new("http://www.a.com/index.html");
    assert_eq!(resolver.current_url(), "http://www.a.com/index.html");
    let _ = resolver.resolve("https://www.shop.other.org/cart", false);
    assert_eq!(resolver.current_domain().domain, "other.org");
    assert_eq!(resolver.current_domain().subdomain, "shop.other.org");
    assert_eq!(resolver.root_domain().domain, "a.com");
    assert_eq!(resolver.root_url(), "http://www.a.com/index.html");
}

#[test]
fn test_directory_path() {
    let mut resolver = UrlResolver::new("http://a.com/");
    let _ = resolver.resolve("http://www.website.com/blah/blah.htm", false);
    assert_eq!(resolver.directory_path(), "www.website.com/blah");
}

// ========================================================================
// Domain decomposition
// ========================================================================

#[test]
fn test_domain_parts_with_subdomain() {
    let parts = DomainParts::parse("http://www.sales.mycompany.com/index.html");
    assert_eq!(parts.full_domain, "http://www.sales.mycompany.com");
    assert_eq!(parts.domain, "mycompany.com");
    assert_eq!(parts.subdomain, "sales.mycompany.com");
}

#[test]
fn test_domain_parts_www_is_not_a_subdomain() {
    let parts = DomainParts::parse("http://www.mycompany.com/");
    assert_eq!(parts.full_domain, "http://www.mycompany.com");
    assert_eq!(parts.domain, "mycompany.com");
    assert_eq!(parts.subdomain, "mycompany.com");
}

#[test]
fn test_domain_parts_bare_domain() {
    let parts = DomainParts::parse("https://mycompany.com");
    assert_eq!(parts.full_domain, "https://mycompany.com");
    assert_eq!(parts.domain, "mycompany.com");
    assert_eq!(parts.subdomain, "mycompany.com");
}

#[test]
fn test_domain_parts_without_dots() {
    let parts = DomainParts::parse("http://localhost/page");
    assert_eq!(parts.full_domain, "http://localhost");
    assert!(parts.domain.is_empty());
}

// ========================================================================
// Free functions
// ========================================================================

#[test]
fn test_is_absolute_url() {
    assert!(is_absolute_url("http://a.com"));
    assert!(is_absolute_url("ftp://files.a.com/x"));
    assert!(is_absolute_url("MAILTO:me@a.com"));
    assert!(is_absolute_url("tel:555-1234"));
    assert!(!is_absolute_url("page.html"));
    assert!(!is_absolute_url("a/b://c"));
    assert!(!is_absolute_url("://nothing"));
}

#[test]
fn test_image_name_from_url() {
    assert_eq!(
        image_name_from_url("http://mysite.com/gallery.php?image=cat.jpg&size=2"),
        "cat.jpg"
    );
    assert_eq!(image_name_from_url("http://mysite.com/gallery.php"), "");
    assert_eq!(image_name_from_url("http://mysite.com/g.php?size=2"), "");
}

#[test]
fn test_top_level_domain_from_url() {
    assert_eq!(top_level_domain_from_url("www.mysite.co.uk/page.htm"), "co.uk");
    assert_eq!(top_level_domain_from_url("mysite.com?q=1"), "com");
    assert_eq!(top_level_domain_from_url("localhost"), "");
}

#[test]
fn test_is_top_level_domain_url() {
    assert!(is_top_level_domain_url("http://a.com"));
    assert!(is_top_level_domain_url("http://a.com/"));
    assert!(!is_top_level_domain_url("http://a.com/x"));
    assert!(!is_top_level_domain_url(""));
}
