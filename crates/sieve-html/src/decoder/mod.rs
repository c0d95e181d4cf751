//! Character-level decoding of the text between tags.
//!
//! Named and numeric character references, the legacy Symbol font, and the
//! superscript/subscript forms used inside `<sup>` and `<sub>`.

/// Named character reference table.
pub mod named_character_references;
/// Numeric character references.
pub mod numeric;
/// Raw text span decoding.
pub mod raw_text;
/// Superscript and subscript transliteration.
pub mod script_forms;
/// Symbol font to Unicode mapping.
pub mod symbol_font;

pub use named_character_references::{SOFT_HYPHEN, entity_count, lookup_entity};
pub use numeric::{NumericReference, decode_numeric_reference};
pub use raw_text::{TextMode, UNKNOWN_ENTITY, decode_raw_text};
pub use script_forms::{to_subscript, to_superscript};
pub use symbol_font::{convert_symbol_font, symbol_font_char};
