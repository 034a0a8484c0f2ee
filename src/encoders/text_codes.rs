//! Character-code views of text: decimal code points and base64-wrapped
//! UTF-8 / ISO-8859-1 bytes with an optional code-point shift.

use super::chunked;
use crate::core::alphabet::Alphabet;
use crate::error::{Result, ToolkitError};

const UNICODE_SPAN: i64 = 0x11_0000;
const LATIN1_SPAN: i64 = 0x100;

/// Space-separated decimal codes of an ASCII string.
pub fn ascii_encode(text: &str) -> Result<String> {
    let mut codes = Vec::with_capacity(text.len());
    for c in text.chars() {
        if !c.is_ascii() {
            return Err(ToolkitError::invalid(format!(
                "Non-ASCII character '{}' (U+{:04X})",
                c, c as u32
            )));
        }
        codes.push((c as u32).to_string());
    }
    Ok(codes.join(" "))
}

/// Rebuilds text from whitespace-separated decimal code points.
pub fn ascii_decode(codes: &str) -> Result<String> {
    codes
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| ToolkitError::invalid(format!("Invalid character code '{}'", token)))
        })
        .collect()
}

fn shift_chars(text: &str, shift: i64, span: i64) -> Result<String> {
    let shift = shift.rem_euclid(span);
    text.chars()
        .map(|c| {
            let code = (c as i64 + shift) % span;
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    ToolkitError::invalid(format!(
                        "Shifting '{}' by {} gives no valid character",
                        c, shift
                    ))
                })
        })
        .collect()
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    chunked::decode(&compact, Alphabet::base64())
}

/// Optionally shifts every code point, then base64-encodes the UTF-8 bytes.
pub fn utf_encode(text: &str, shift: Option<i64>) -> Result<String> {
    let shifted = match shift {
        Some(n) => shift_chars(text, n, UNICODE_SPAN)?,
        None => text.to_string(),
    };
    Ok(chunked::encode(shifted.as_bytes(), Alphabet::base64()))
}

pub fn utf_decode(encoded: &str, shift: Option<i64>) -> Result<String> {
    let bytes = decode_base64(encoded)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ToolkitError::invalid(format!("Decoded bytes are not UTF-8: {}", e)))?;
    match shift {
        Some(n) => shift_chars(&text, UNICODE_SPAN - n.rem_euclid(UNICODE_SPAN), UNICODE_SPAN),
        None => Ok(text),
    }
}

/// Like [`utf_encode`] but over ISO-8859-1, so every character must be below U+0100.
pub fn iso_encode(text: &str, shift: Option<i64>) -> Result<String> {
    let shifted = match shift {
        Some(n) => shift_chars(text, n, LATIN1_SPAN)?,
        None => text.to_string(),
    };

    let mut bytes = Vec::with_capacity(shifted.len());
    for c in shifted.chars() {
        let byte = u8::try_from(c as u32).map_err(|_| {
            ToolkitError::invalid(format!("Character '{}' is not representable in ISO-8859-1", c))
        })?;
        bytes.push(byte);
    }
    Ok(chunked::encode(&bytes, Alphabet::base64()))
}

pub fn iso_decode(encoded: &str, shift: Option<i64>) -> Result<String> {
    let bytes = decode_base64(encoded)?;
    let text: String = bytes.into_iter().map(char::from).collect();
    match shift {
        Some(n) => shift_chars(&text, LATIN1_SPAN - n.rem_euclid(LATIN1_SPAN), LATIN1_SPAN),
        None => Ok(text),
    }
}
