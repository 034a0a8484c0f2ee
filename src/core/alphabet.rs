use std::collections::HashMap;
use std::sync::OnceLock;

/// Digit alphabet for custom-radix numerals: digits, then A-Z, then a-z.
pub const RADIX62_DIGITS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE32_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE58_CHARS: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BASE64_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64URL_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const BASE85_CHARS: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

/// How an alphabet turns bytes into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Whole input treated as one big-endian integer and re-expressed in the
    /// alphabet's radix. Leading zero bytes map to leading zero digits.
    Radix,
    /// Fixed-size bit groups per RFC 4648. Requires a power-of-two alphabet.
    Chunked,
    /// Four-byte blocks to five symbols (base85 family).
    Block,
}

/// A symbol alphabet with its encoding mode and optional padding.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: Vec<char>,
    char_to_index: HashMap<char, usize>,
    mode: EncodingMode,
    padding: Option<char>,
}

impl Alphabet {
    /// Creates an alphabet from a character list.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The alphabet is empty or contains duplicates
    /// - Chunked mode is used with a non-power-of-two alphabet size
    pub fn new(chars: Vec<char>, mode: EncodingMode, padding: Option<char>) -> Result<Self, String> {
        if chars.is_empty() {
            return Err("Alphabet cannot be empty".to_string());
        }

        if mode == EncodingMode::Chunked && !chars.len().is_power_of_two() {
            return Err(format!(
                "Chunked mode requires power-of-two alphabet size, got {}",
                chars.len()
            ));
        }

        let mut char_to_index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if char_to_index.insert(c, i).is_some() {
                return Err(format!("Duplicate character in alphabet: {}", c));
            }
        }

        Ok(Alphabet {
            chars,
            char_to_index,
            mode,
            padding,
        })
    }

    fn builtin(chars: &str, mode: EncodingMode, padding: Option<char>) -> Self {
        match Self::new(chars.chars().collect(), mode, padding) {
            Ok(alphabet) => alphabet,
            Err(e) => unreachable!("built-in alphabet is malformed: {}", e),
        }
    }

    pub fn base(&self) -> usize {
        self.chars.len()
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn padding(&self) -> Option<char> {
        self.padding
    }

    /// Encodes a digit (0 to base-1) as a character.
    ///
    /// Returns `None` if the digit is out of range.
    pub fn encode_digit(&self, digit: usize) -> Option<char> {
        self.chars.get(digit).copied()
    }

    /// Decodes a character back to its digit value.
    ///
    /// Returns `None` if the character is not in the alphabet.
    pub fn decode_char(&self, c: char) -> Option<usize> {
        self.char_to_index.get(&c).copied()
    }

    /// The symbols as a string, for error hints.
    pub fn symbols(&self) -> String {
        self.chars.iter().collect()
    }

    /// RFC 4648 base32 with `=` padding.
    pub fn base32() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(BASE32_CHARS, EncodingMode::Chunked, Some('=')))
    }

    /// Base36 over `0-9A-Z`.
    pub fn base36() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(&RADIX62_DIGITS[..36], EncodingMode::Radix, None))
    }

    /// Bitcoin base58 (no `0`, `O`, `I`, `l`).
    pub fn base58() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(BASE58_CHARS, EncodingMode::Radix, None))
    }

    /// Base62 over `0-9A-Za-z`.
    pub fn base62() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(RADIX62_DIGITS, EncodingMode::Radix, None))
    }

    /// RFC 4648 standard base64 with `=` padding.
    pub fn base64() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(BASE64_CHARS, EncodingMode::Chunked, Some('=')))
    }

    /// RFC 4648 url-safe base64 (`-` and `_`) with `=` padding.
    pub fn base64_url() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(BASE64URL_CHARS, EncodingMode::Chunked, Some('=')))
    }

    /// RFC 1924 base85 character set.
    pub fn base85() -> &'static Alphabet {
        static CELL: OnceLock<Alphabet> = OnceLock::new();
        CELL.get_or_init(|| Self::builtin(BASE85_CHARS, EncodingMode::Block, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        assert_eq!(Alphabet::base32().base(), 32);
        assert_eq!(Alphabet::base36().base(), 36);
        assert_eq!(Alphabet::base58().base(), 58);
        assert_eq!(Alphabet::base62().base(), 62);
        assert_eq!(Alphabet::base64().base(), 64);
        assert_eq!(Alphabet::base64_url().base(), 64);
        assert_eq!(Alphabet::base85().base(), 85);
    }

    #[test]
    fn test_digit_lookup() {
        let alphabet = Alphabet::base62();
        assert_eq!(alphabet.encode_digit(0), Some('0'));
        assert_eq!(alphabet.encode_digit(10), Some('A'));
        assert_eq!(alphabet.encode_digit(61), Some('z'));
        assert_eq!(alphabet.encode_digit(62), None);
        assert_eq!(alphabet.decode_char('a'), Some(36));
        assert_eq!(alphabet.decode_char('!'), None);
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = Alphabet::new(vec!['a', 'b', 'a'], EncodingMode::Radix, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_chunked_requires_power_of_two() {
        let result = Alphabet::new(vec!['a', 'b', 'c'], EncodingMode::Chunked, None);
        assert!(result.is_err());
    }
}
