use crate::core::alphabet::Alphabet;
use crate::error::{Result, ToolkitError};
use num_integer::lcm;

/// RFC 4648 bit-group encoding (base32, base64, url-safe base64).
pub fn encode(data: &[u8], alphabet: &Alphabet) -> String {
    let bits_per_char = alphabet.base().trailing_zeros() as usize;

    if bits_per_char == 0 {
        return String::new();
    }

    let output_chars = (data.len() * 8).div_ceil(bits_per_char);
    let group_size = lcm(bits_per_char, 8) / bits_per_char;
    let mut result = String::with_capacity(output_chars.div_ceil(group_size) * group_size);

    let mask = (1u32 << bits_per_char) - 1;
    let mut bit_buffer = 0u32;
    let mut bits_in_buffer = 0usize;

    for &byte in data {
        bit_buffer = (bit_buffer << 8) | (byte as u32);
        bits_in_buffer += 8;

        while bits_in_buffer >= bits_per_char {
            bits_in_buffer -= bits_per_char;
            let index = ((bit_buffer >> bits_in_buffer) & mask) as usize;
            push_digit(&mut result, alphabet, index);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((bit_buffer << (bits_per_char - bits_in_buffer)) & mask) as usize;
        push_digit(&mut result, alphabet, index);
    }

    // Padding group: base64 lcm(6,8)/6 = 4, base32 lcm(5,8)/5 = 8
    if let Some(pad_char) = alphabet.padding() {
        let padded_chars = result.len().div_ceil(group_size) * group_size;
        while result.len() < padded_chars {
            result.push(pad_char);
        }
    }

    result
}

/// Decodes RFC 4648 text. Decoding stops at the first padding character;
/// missing padding is accepted.
///
/// # Errors
///
/// Returns `InvalidInput` for characters outside the alphabet and for a
/// length no valid encoder could have produced.
pub fn decode(encoded: &str, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let bits_per_char = alphabet.base().trailing_zeros() as usize;
    let padding = alphabet.padding();

    let mut result = Vec::with_capacity((encoded.len() * bits_per_char) / 8);
    let mut bit_buffer = 0u32;
    let mut bits_in_buffer = 0usize;
    let mut symbols = 0usize;

    for (position, c) in encoded.chars().enumerate() {
        if Some(c) == padding {
            break;
        }

        let value = alphabet.decode_char(c).ok_or_else(|| {
            ToolkitError::invalid(format!(
                "Invalid character '{}' at position {} for base {}",
                c,
                position,
                alphabet.base()
            ))
        })?;

        bit_buffer = (bit_buffer << bits_per_char) | (value as u32);
        bits_in_buffer += bits_per_char;
        symbols += 1;

        while bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            result.push(((bit_buffer >> bits_in_buffer) & 0xFF) as u8);
        }
    }

    // A dangling group too short to hold a single byte
    if bits_in_buffer >= bits_per_char {
        return Err(ToolkitError::invalid(format!(
            "Invalid base{} length: {} symbols",
            alphabet.base(),
            symbols
        )));
    }

    Ok(result)
}

fn push_digit(out: &mut String, alphabet: &Alphabet, index: usize) {
    if let Some(c) = alphabet.encode_digit(index) {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_rfc4648_vectors() {
        let alphabet = Alphabet::base64();
        assert_eq!(encode(b"", alphabet), "");
        assert_eq!(encode(b"f", alphabet), "Zg==");
        assert_eq!(encode(b"fo", alphabet), "Zm8=");
        assert_eq!(encode(b"foo", alphabet), "Zm9v");
        assert_eq!(encode(b"foobar", alphabet), "Zm9vYmFy");
    }

    #[test]
    fn test_base32_rfc4648_vectors() {
        let alphabet = Alphabet::base32();
        assert_eq!(encode(b"f", alphabet), "MY======");
        assert_eq!(encode(b"hello", alphabet), "NBSWY3DP");
        assert_eq!(encode(b"foobar", alphabet), "MZXW6YTBOI======");
    }

    #[test]
    fn test_decode_with_and_without_padding() {
        let alphabet = Alphabet::base64();
        assert_eq!(decode("Zm8=", alphabet).unwrap(), b"fo");
        assert_eq!(decode("Zm8", alphabet).unwrap(), b"fo");
        assert_eq!(decode("MY======", Alphabet::base32()).unwrap(), b"f");
    }

    #[test]
    fn test_url_safe_alphabet() {
        let data = [0xfbu8, 0xff];
        assert_eq!(encode(&data, Alphabet::base64()), "+/8=");
        assert_eq!(encode(&data, Alphabet::base64_url()), "-_8=");
        assert_eq!(decode("-_8=", Alphabet::base64_url()).unwrap(), data);
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert!(decode("Zm9v!", Alphabet::base64()).is_err());
        assert!(decode("Z", Alphabet::base64()).is_err());
    }
}
