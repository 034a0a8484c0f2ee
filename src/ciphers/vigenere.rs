use crate::error::{Result, ToolkitError};

use super::caesar::shift_char;

fn key_shifts(key: &str) -> Result<Vec<i64>> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ToolkitError::invalid(format!(
            "Vigenere key must be a non-empty alphabetic string, got '{}'",
            key
        )));
    }
    Ok(key
        .chars()
        .map(|c| (c.to_ascii_uppercase() as u8 - b'A') as i64)
        .collect())
}

fn process(text: &str, key: &str, direction: i64) -> Result<String> {
    let shifts = key_shifts(key.trim())?;
    let mut index = 0usize;

    Ok(text
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let shifted = shift_char(c, direction * shifts[index % shifts.len()]);
                index += 1;
                shifted
            } else {
                c
            }
        })
        .collect())
}

/// Repeating-key shift over ASCII letters; other characters do not consume the key.
pub fn encrypt(text: &str, key: &str) -> Result<String> {
    process(text, key, 1)
}

pub fn decrypt(text: &str, key: &str) -> Result<String> {
    process(text, key, -1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_vector() {
        assert_eq!(encrypt("ATTACKATDAWN", "LEMON").unwrap(), "LXFOPVEFRNHR");
        assert_eq!(decrypt("LXFOPVEFRNHR", "lemon").unwrap(), "ATTACKATDAWN");
    }

    #[test]
    fn test_punctuation_does_not_advance_key() {
        assert_eq!(encrypt("a b", "AB").unwrap(), "a c");
        assert_eq!(encrypt("Attack, at dawn!", "Lemon").unwrap(), "Lxfopv, ef rnhr!");
    }

    #[test]
    fn test_bad_keys() {
        assert!(encrypt("x", "").is_err());
        assert!(encrypt("x", "k3y").is_err());
    }
}
