use crate::core::alphabet::Alphabet;
use crate::error::{Result, ToolkitError};

/// Base85 over the RFC 1924 character set.
///
/// Input is zero-padded to whole 4-byte words, each word becomes five
/// symbols, and the symbols standing for the padding are dropped again.
pub fn encode(data: &[u8]) -> String {
    let alphabet = Alphabet::base85();
    let padding = (4 - data.len() % 4) % 4;
    let mut result = String::with_capacity((data.len() + padding) / 4 * 5);

    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(word);

        let mut block = ['\0'; 5];
        for slot in block.iter_mut().rev() {
            *slot = alphabet.encode_digit((value % 85) as usize).unwrap_or('0');
            value /= 85;
        }
        result.extend(block);
    }

    result.truncate(result.len() - padding);
    result
}

/// Decodes base85 text produced by [`encode`].
///
/// # Errors
///
/// Returns `InvalidInput` for characters outside the alphabet or for a
/// five-symbol group whose value does not fit in 32 bits.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let alphabet = Alphabet::base85();
    let mut symbols = Vec::with_capacity(encoded.len());

    for (position, c) in encoded.chars().enumerate() {
        let value = alphabet.decode_char(c).ok_or_else(|| {
            ToolkitError::invalid(format!(
                "Invalid character '{}' at position {} for base 85",
                c, position
            ))
        })?;
        symbols.push(value as u64);
    }

    // Pad with the highest digit, mirroring the zero-padding on encode
    let padding = (5 - symbols.len() % 5) % 5;
    symbols.resize(symbols.len() + padding, 84);

    let mut result = Vec::with_capacity(symbols.len() / 5 * 4);
    for (group, block) in symbols.chunks(5).enumerate() {
        let value = block.iter().fold(0u64, |acc, &d| acc * 85 + d);
        let word = u32::try_from(value).map_err(|_| {
            ToolkitError::invalid(format!("base85 overflow in group starting at {}", group * 5))
        })?;
        result.extend_from_slice(&word.to_be_bytes());
    }

    result.truncate(result.len() - padding);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(encode(b"hello"), "Xk~0{Zv");
        assert_eq!(encode(b"hi"), "XlV");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("Xk~0{Zv").unwrap(), b"hello");
        assert_eq!(decode("XlV").unwrap(), b"hi");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_zero_word() {
        assert_eq!(encode(&[0, 0, 0, 0]), "00000");
        assert_eq!(decode("00000").unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(decode("Xk\"0").is_err());
        assert!(decode("~~~~~").is_err());
    }
}
