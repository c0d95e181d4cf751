//! Structural scanning over raw markup.
//!
//! The scanner never builds a tree. It works on byte offsets into the
//! original text and only answers "where" questions: where the next
//! unquoted delimiter is, where a tag closes, where an attribute value lies.

/// Tag, attribute and element locator.
pub mod locator;
/// Quote-aware search primitives.
pub mod primitives;

pub use locator::{
    compare_element, compare_element_case_sensitive, element_name, find_close_tag,
    find_closing_element, find_element, find_end_tag, find_tag, read_attribute,
    read_attribute_as_long, read_attribute_as_string, read_element_as_string,
};
pub use primitives::{
    find_char_outside_quotes, find_ignore_case, find_substring_outside_quotes,
    starts_with_ignore_case,
};
