use crate::error::{Result, ToolkitError};

/// Shifts one ASCII letter within its case; everything else is returned as is.
pub fn shift_char(c: char, shift: i64) -> char {
    let base = if c.is_ascii_lowercase() {
        b'a'
    } else if c.is_ascii_uppercase() {
        b'A'
    } else {
        return c;
    };
    let offset = c as u8 - base;
    let shift = shift.rem_euclid(26) as u8;
    (base + (offset + shift) % 26) as char
}

/// ROT-N: shifts every ASCII letter by `shift mod 26`.
pub fn encrypt(text: &str, shift: i64) -> String {
    text.chars().map(|c| shift_char(c, shift)).collect()
}

/// Inverse of [`encrypt`].
pub fn decrypt(text: &str, shift: i64) -> String {
    encrypt(text, 26 - shift.rem_euclid(26))
}

/// Parses a shift amount such as `13` or `-3`.
pub fn parse_shift(raw: Option<&str>) -> Result<i64> {
    let raw = raw.ok_or_else(|| ToolkitError::invalid("A shift value is required"))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ToolkitError::invalid(format!("Invalid shift value: '{}'", raw)))
}
