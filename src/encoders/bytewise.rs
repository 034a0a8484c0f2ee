//! One token per UTF-8 byte, separated by spaces.

use crate::error::{Result, ToolkitError};

/// Writes each byte as a fixed-width token: `08b`, `03o`, plain decimal or `02X`.
pub fn encode(data: &[u8], radix: u32) -> String {
    let tokens: Vec<String> = data
        .iter()
        .map(|b| match radix {
            2 => format!("{:08b}", b),
            8 => format!("{:03o}", b),
            16 => format!("{:02X}", b),
            _ => b.to_string(),
        })
        .collect();
    tokens.join(" ")
}

/// Parses whitespace-separated byte tokens. Hex input may also be one
/// unbroken run of digit pairs.
///
/// # Errors
///
/// Returns `InvalidInput` for a token that is not a byte in `radix`.
pub fn decode(encoded: &str, radix: u32) -> Result<Vec<u8>> {
    if radix == 16 {
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        return hex::decode(&compact)
            .map_err(|e| ToolkitError::invalid(format!("Invalid hexadecimal '{}': {}", compact, e)));
    }

    encoded
        .split_whitespace()
        .map(|token| {
            u8::from_str_radix(token, radix).map_err(|_| {
                ToolkitError::invalid(format!("Invalid base {} byte '{}'", radix, token))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_each_radix() {
        assert_eq!(encode(b"Hi", 2), "01001000 01101001");
        assert_eq!(encode(b"Hi", 8), "110 151");
        assert_eq!(encode(b"Hi", 10), "72 105");
        assert_eq!(encode(b"Hi", 16), "48 69");
    }

    #[test]
    fn test_decode_hex_ignores_spacing() {
        assert_eq!(decode("48 69", 16).unwrap(), b"Hi");
        assert_eq!(decode("4869", 16).unwrap(), b"Hi");
        assert_eq!(decode("4869", 16).unwrap(), decode("48\n69", 16).unwrap());
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(decode("256", 10).is_err());
        assert!(decode("012", 2).is_err());
        assert!(decode("4G", 16).is_err());
    }
}
