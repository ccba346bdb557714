//! Code point helpers
//!
//! Icons are addressed by lowercase, unpadded hex (`e000`, `41`), the form
//! used in file names, CSS escapes and HTML entities.

use crate::core::errors::{Error, Result};

/// First code point of the Unicode Private Use Area
pub const PRIVATE_USE_START: u32 = 0xE000;

/// Lowercase hex of a code point without padding
pub fn to_hex(codepoint: char) -> String {
    format!("{:x}", codepoint as u32)
}

/// Decode 2 to 6 hex digits into a Unicode scalar value
pub fn from_hex(hex: &str) -> Result<char> {
    if !(2..=6).contains(&hex.len()) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::MalformedInput(format!(
            "\"{hex}\" is not a 2 to 6 digit hex code point"
        )));
    }
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::MalformedInput(format!("U+{hex} is not a Unicode scalar value")))
}

/// `content` value for CSS, e.g. `\e000`
pub fn css_escape(codepoint: char) -> String {
    format!("\\{}", to_hex(codepoint))
}

/// Hex character reference, e.g. `&#xe000;`
pub fn char_reference(codepoint: char) -> String {
    format!("&#x{};", to_hex(codepoint))
}
