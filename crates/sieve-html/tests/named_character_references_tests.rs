//! Integration tests for named character reference lookup.

use sieve_html::decoder::{SOFT_HYPHEN, entity_count, lookup_entity};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some('&'));
    assert_eq!(lookup_entity("lt"), Some('<'));
    assert_eq!(lookup_entity("gt"), Some('>'));
    assert_eq!(lookup_entity("quot"), Some('"'));
    assert_eq!(lookup_entity("apos"), Some('\''));
    assert_eq!(lookup_entity("copy"), Some('\u{00A9}'));
}

#[test]
fn test_nbsp_is_a_plain_space() {
    // extracted text is meant for word processing, not layout
    assert_eq!(lookup_entity("nbsp"), Some(' '));
}

#[test]
fn test_case_sensitive_names_stay_distinct() {
    assert_eq!(lookup_entity("Alpha"), Some('Α'));
    assert_eq!(lookup_entity("alpha"), Some('α'));
    assert_eq!(lookup_entity("Ccedil"), Some('Ç'));
}

#[test]
fn test_uppercase_falls_back_to_lowercase() {
    assert_eq!(lookup_entity("AMP"), Some('&'));
    assert_eq!(lookup_entity("LT"), Some('<'));
    assert_eq!(lookup_entity("Copy"), Some('\u{00A9}'));
    assert_eq!(lookup_entity("HELLIP"), Some('…'));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
    // the name never includes the terminator
    assert_eq!(lookup_entity("amp;"), None);
}

#[test]
fn test_symbols_and_punctuation() {
    assert_eq!(lookup_entity("frac12"), Some('½'));
    assert_eq!(lookup_entity("cedil"), Some('¸'));
    assert_eq!(lookup_entity("euro"), Some('€'));
    assert_eq!(lookup_entity("trade"), Some('™'));
    assert_eq!(lookup_entity("mdash"), Some('—'));
    assert_eq!(lookup_entity("le"), Some('≤'));
    assert_eq!(lookup_entity("pi"), Some('π'));
}

#[test]
fn test_soft_hyphen_entry() {
    assert_eq!(lookup_entity("shy"), Some(SOFT_HYPHEN));
}

#[test]
fn test_table_size() {
    assert!(entity_count() > 250);
}
