//! Numeric character references (`&#960;`, `&#x3C0;`).

/// What a numeric character reference decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericReference {
    /// A single character.
    Char(char),
    /// A presentation-form ligature (U+FB00 to U+FB06), spelled out in ASCII.
    Ligature(&'static str),
    /// U+00AD, which is dropped from extracted text.
    SoftHyphen,
    /// No digits, code point zero, or not a Unicode scalar value.
    Invalid,
}

/// Decode the body of a numeric reference: the text after `&#` and before
/// the terminator.
///
/// A leading `x` or `X` selects hexadecimal. As with `atoi`, parsing stops at
/// the first character that is not a digit of the selected base.
///
/// # Example
/// ```
/// use sieve_html::decoder::{NumericReference, decode_numeric_reference};
///
/// assert_eq!(decode_numeric_reference("960"), NumericReference::Char('π'));
/// assert_eq!(decode_numeric_reference("x3C0"), NumericReference::Char('π'));
/// assert_eq!(decode_numeric_reference("xFB01"), NumericReference::Ligature("fi"));
/// assert_eq!(decode_numeric_reference("173"), NumericReference::SoftHyphen);
/// assert_eq!(decode_numeric_reference("0"), NumericReference::Invalid);
/// ```
#[must_use]
pub fn decode_numeric_reference(body: &str) -> NumericReference {
    let (digits, radix) = match body.as_bytes().first() {
        Some(b'x' | b'X') => (&body[1..], 16),
        _ => (body, 10),
    };
    let len = digits
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();

    let Ok(code_point) = u32::from_str_radix(&digits[..len], radix) else {
        return NumericReference::Invalid;
    };
    match code_point {
        0 => NumericReference::Invalid,
        0xAD => NumericReference::SoftHyphen,
        0xFB00 => NumericReference::Ligature("ff"),
        0xFB01 => NumericReference::Ligature("fi"),
        0xFB02 => NumericReference::Ligature("fl"),
        0xFB03 => NumericReference::Ligature("ffi"),
        0xFB04 => NumericReference::Ligature("ffl"),
        0xFB05 => NumericReference::Ligature("ft"),
        0xFB06 => NumericReference::Ligature("st"),
        _ => char::from_u32(code_point).map_or(NumericReference::Invalid, NumericReference::Char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_stops_at_first_non_digit() {
        assert_eq!(decode_numeric_reference("65abc"), NumericReference::Char('A'));
        assert_eq!(decode_numeric_reference("X41zz"), NumericReference::Char('A'));
    }

    #[test]
    fn test_invalid_bodies() {
        assert_eq!(decode_numeric_reference(""), NumericReference::Invalid);
        assert_eq!(decode_numeric_reference("x"), NumericReference::Invalid);
        assert_eq!(decode_numeric_reference("abc"), NumericReference::Invalid);
        // surrogates are not scalar values
        assert_eq!(decode_numeric_reference("xD800"), NumericReference::Invalid);
        // overflows u32
        assert_eq!(
            decode_numeric_reference("99999999999"),
            NumericReference::Invalid
        );
    }
}
