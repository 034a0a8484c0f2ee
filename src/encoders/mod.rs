//! Encoders for byte-oriented bases and integer numerals.

pub mod base85;
pub mod bytewise;
pub mod chunked;
pub mod numeral;
pub mod radix;
pub mod text_codes;

use crate::core::alphabet::{Alphabet, EncodingMode};
use crate::error::{Result, ToolkitError};

/// Bases accepted by the `BaseN` operation family. `-1` selects url-safe base64.
pub const ALLOWED_BASES: [i32; 11] = [2, 8, 10, 16, 32, 36, 58, 62, 64, 85, -1];

/// A byte-oriented encoding of UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteBase {
    Binary,
    Octal,
    Decimal,
    Hex,
    Base32,
    Base36,
    Base58,
    Base62,
    Base64,
    Base85,
    Base64Url,
}

impl ByteBase {
    pub const ALL: [ByteBase; 11] = [
        ByteBase::Binary,
        ByteBase::Octal,
        ByteBase::Decimal,
        ByteBase::Hex,
        ByteBase::Base32,
        ByteBase::Base36,
        ByteBase::Base58,
        ByteBase::Base62,
        ByteBase::Base64,
        ByteBase::Base85,
        ByteBase::Base64Url,
    ];

    /// Maps a numeric base (or `-1` for url-safe base64) to its encoding.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` naming the base when it is not in
    /// [`ALLOWED_BASES`].
    pub fn from_number(base: i32) -> Result<Self> {
        let found = match base {
            2 => ByteBase::Binary,
            8 => ByteBase::Octal,
            10 => ByteBase::Decimal,
            16 => ByteBase::Hex,
            32 => ByteBase::Base32,
            36 => ByteBase::Base36,
            58 => ByteBase::Base58,
            62 => ByteBase::Base62,
            64 => ByteBase::Base64,
            85 => ByteBase::Base85,
            -1 => ByteBase::Base64Url,
            other => {
                return Err(ToolkitError::unsupported(format!(
                    "Unsupported base: {}",
                    other
                )));
            }
        };
        Ok(found)
    }

    pub fn number(&self) -> i32 {
        match self {
            ByteBase::Binary => 2,
            ByteBase::Octal => 8,
            ByteBase::Decimal => 10,
            ByteBase::Hex => 16,
            ByteBase::Base32 => 32,
            ByteBase::Base36 => 36,
            ByteBase::Base58 => 58,
            ByteBase::Base62 => 62,
            ByteBase::Base64 => 64,
            ByteBase::Base85 => 85,
            ByteBase::Base64Url => -1,
        }
    }

    /// Operation id for this base, e.g. `Base64` or `BaseURL`.
    pub fn id(&self) -> &'static str {
        match self {
            ByteBase::Binary => "Base2",
            ByteBase::Octal => "Base8",
            ByteBase::Decimal => "Base10",
            ByteBase::Hex => "Base16",
            ByteBase::Base32 => "Base32",
            ByteBase::Base36 => "Base36",
            ByteBase::Base58 => "Base58",
            ByteBase::Base62 => "Base62",
            ByteBase::Base64 => "Base64",
            ByteBase::Base85 => "Base85",
            ByteBase::Base64Url => "BaseURL",
        }
    }

    fn codec(&self) -> Codec {
        match self {
            ByteBase::Binary => Codec::Bytewise(2),
            ByteBase::Octal => Codec::Bytewise(8),
            ByteBase::Decimal => Codec::Bytewise(10),
            ByteBase::Hex => Codec::Bytewise(16),
            ByteBase::Base32 => Codec::Alphabet(Alphabet::base32()),
            ByteBase::Base36 => Codec::Alphabet(Alphabet::base36()),
            ByteBase::Base58 => Codec::Alphabet(Alphabet::base58()),
            ByteBase::Base62 => Codec::Alphabet(Alphabet::base62()),
            ByteBase::Base64 => Codec::Alphabet(Alphabet::base64()),
            ByteBase::Base85 => Codec::Alphabet(Alphabet::base85()),
            ByteBase::Base64Url => Codec::Alphabet(Alphabet::base64_url()),
        }
    }

    /// Single-case alphabets accept either case on input.
    fn fold_case(&self, encoded: &str) -> String {
        match self {
            ByteBase::Base32 | ByteBase::Base36 => encoded.to_uppercase(),
            _ => encoded.to_string(),
        }
    }

    /// Encodes raw bytes. Alphabet bases pick their codec from the
    /// alphabet's [`EncodingMode`].
    pub fn encode(&self, data: &[u8]) -> String {
        match self.codec() {
            Codec::Bytewise(radix) => bytewise::encode(data, radix),
            Codec::Alphabet(alphabet) => match alphabet.mode() {
                EncodingMode::Radix => radix::encode(data, alphabet),
                EncodingMode::Chunked => chunked::encode(data, alphabet),
                EncodingMode::Block => base85::encode(data),
            },
        }
    }

    /// Decodes to raw bytes. Surrounding whitespace is ignored, and so is
    /// inner whitespace for the RFC 4648 bases.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        let encoded = encoded.trim();
        match self.codec() {
            Codec::Bytewise(radix) => bytewise::decode(encoded, radix),
            Codec::Alphabet(alphabet) => match alphabet.mode() {
                EncodingMode::Radix => radix::decode(&self.fold_case(encoded), alphabet),
                EncodingMode::Chunked => {
                    chunked::decode(&self.fold_case(&compact(encoded)), alphabet)
                }
                EncodingMode::Block => base85::decode(encoded),
            },
        }
    }

    /// Encodes the UTF-8 bytes of `text`.
    pub fn encode_text(&self, text: &str) -> String {
        self.encode(text.as_bytes())
    }

    /// Decodes and requires the bytes to be valid UTF-8.
    pub fn decode_text(&self, encoded: &str) -> Result<String> {
        let bytes = self.decode(encoded)?;
        String::from_utf8(bytes).map_err(|e| {
            ToolkitError::invalid(format!(
                "{} data does not decode to UTF-8 text: {}",
                self.id(),
                e
            ))
        })
    }
}

enum Codec {
    /// One fixed-width token per byte
    Bytewise(u32),
    Alphabet(&'static Alphabet),
}

fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_bases_map_both_ways() {
        for base in ALLOWED_BASES {
            assert_eq!(ByteBase::from_number(base).unwrap().number(), base);
        }
        assert_eq!(ByteBase::ALL.len(), ALLOWED_BASES.len());
    }

    #[test]
    fn test_unsupported_base_is_named() {
        let err = ByteBase::from_number(7).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedOperation);
        assert!(err.message().contains('7'));
    }

    #[test]
    fn test_text_round_trip_every_base() {
        let samples = ["hello", "", "héllo wörld ✓", "\0lead"];
        for base in ByteBase::ALL {
            for sample in samples {
                let encoded = base.encode_text(sample);
                assert_eq!(base.decode_text(&encoded).unwrap(), sample, "{:?}", base);
            }
        }
    }

    #[test]
    fn test_codec_follows_alphabet_mode() {
        assert_eq!(ByteBase::Base64.encode(b"hello"), "aGVsbG8=");
        assert_eq!(ByteBase::Base32.encode(b"hello"), "NBSWY3DP");
        assert_eq!(ByteBase::Base58.encode(b"\0\x01"), "12");
        assert_eq!(Alphabet::base85().mode(), EncodingMode::Block);
        assert_eq!(ByteBase::Base85.decode_text(&ByteBase::Base85.encode(b"abcd")).unwrap(), "abcd");
    }

    #[test]
    fn test_base32_lowercase_and_spacing_accepted() {
        assert_eq!(ByteBase::Base32.decode_text("nbsw y3dp").unwrap(), "hello");
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let err = ByteBase::Hex.decode_text("FF FE").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }
}
