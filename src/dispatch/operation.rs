//! The closed set of operations and the parameters each one needs.

use super::normalize::NormalizedRequest;
use crate::encoders::ByteBase;
use crate::error::{Result, ToolkitError};
use crate::features::{GeneratorKind, HashAlgorithm, UnitCategory};

/// Which auxiliary parameters an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterShape {
    TextOnly,
    /// `base` is required
    TextAndBase,
    /// `mode` is optional and only steers direction
    TextAndMode,
    /// `mode` and `mode2` are both required
    TextAndTwoModes,
    /// `base` carries a key or shift; the operation decides whether it is
    /// optional
    TextAndKey,
}

impl ParameterShape {
    /// Rejects requests missing a parameter this shape requires.
    pub fn check(&self, request: &NormalizedRequest) -> Result<()> {
        match self {
            ParameterShape::TextAndBase if request.base().is_none() => Err(ToolkitError::invalid(
                format!("{} requires a base value", request.operation()),
            )),
            ParameterShape::TextAndTwoModes
                if request.mode().is_none() || request.mode2().is_none() =>
            {
                Err(ToolkitError::invalid(
                    "Please select both source and target units",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encode,
    Decode,
}

impl Direction {
    /// Reads an explicit direction from a mode selector.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode.to_lowercase().as_str() {
            "encode" | "text → base" | "text -> base" => Some(Direction::Encode),
            "decode" | "base → text" | "base -> text" => Some(Direction::Decode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCipher {
    Morse,
    Braille,
    Grid,
    Emoji,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextCode {
    Ascii,
    Utf,
    Iso,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checker {
    Prime,
    Divisibility,
    Divisors,
    Factors,
    PerfectSquare,
    PerfectCube,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    Characters,
    CharacterFrequency,
    Entropy,
    RepeatedSequences,
    ExtractNumbers,
    NumberFrequency,
    BasicStatistics,
    SpecialProperties,
    CipherDetection,
    CaesarCracker,
}

/// Grouping used when listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Numerals,
    CustomRadix,
    ByteEncodings,
    Ciphers,
    TextCodes,
    Hashing,
    Checkers,
    Analysis,
    NumericAnalysis,
    Detection,
    Generators,
    Units,
}

impl Family {
    pub const ALL: [Family; 12] = [
        Family::Numerals,
        Family::CustomRadix,
        Family::ByteEncodings,
        Family::Ciphers,
        Family::TextCodes,
        Family::Hashing,
        Family::Checkers,
        Family::Analysis,
        Family::NumericAnalysis,
        Family::Detection,
        Family::Generators,
        Family::Units,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Family::Numerals => "Numeral conversion",
            Family::CustomRadix => "Custom radix",
            Family::ByteEncodings => "Byte encodings",
            Family::Ciphers => "Classical ciphers",
            Family::TextCodes => "Text codes",
            Family::Hashing => "Hashing",
            Family::Checkers => "Checkers",
            Family::Analysis => "Text analysis",
            Family::NumericAnalysis => "Numeric analysis",
            Family::Detection => "Cipher detection",
            Family::Generators => "Generators",
            Family::Units => "Unit conversion",
        }
    }
}

/// Every operation the dispatcher can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Numeral { from: u32, to: u32 },
    CustomRadix(Direction),
    Roman(Direction),
    /// `None` means the direction is inferred from the text
    ByteEncoding(ByteBase, Option<Direction>),
    Symbol(SymbolCipher, Direction),
    RotN(Direction),
    Affine(Direction),
    Vigenere(Direction),
    TextCode(TextCode, Direction),
    Hash(HashAlgorithm),
    Generate(GeneratorKind),
    Check(Checker),
    Analyze(Analyzer),
    Units(UnitCategory),
}

impl Operation {
    pub fn shape(&self) -> ParameterShape {
        match self {
            Operation::CustomRadix(_) | Operation::Check(Checker::Divisibility) => {
                ParameterShape::TextAndBase
            }
            Operation::ByteEncoding(..) => ParameterShape::TextAndMode,
            Operation::Units(_) => ParameterShape::TextAndTwoModes,
            Operation::RotN(_)
            | Operation::Affine(_)
            | Operation::Vigenere(_)
            | Operation::TextCode(TextCode::Utf | TextCode::Iso, _) => ParameterShape::TextAndKey,
            _ => ParameterShape::TextOnly,
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Operation::Numeral { .. } | Operation::Roman(_) => Family::Numerals,
            Operation::CustomRadix(_) => Family::CustomRadix,
            Operation::ByteEncoding(..) => Family::ByteEncodings,
            Operation::Symbol(..)
            | Operation::RotN(_)
            | Operation::Affine(_)
            | Operation::Vigenere(_) => Family::Ciphers,
            Operation::TextCode(..) => Family::TextCodes,
            Operation::Hash(_) => Family::Hashing,
            Operation::Generate(_) => Family::Generators,
            Operation::Check(_) => Family::Checkers,
            Operation::Analyze(
                Analyzer::ExtractNumbers
                | Analyzer::NumberFrequency
                | Analyzer::BasicStatistics
                | Analyzer::SpecialProperties,
            ) => Family::NumericAnalysis,
            Operation::Analyze(Analyzer::CipherDetection | Analyzer::CaesarCracker) => {
                Family::Detection
            }
            Operation::Analyze(_) => Family::Analysis,
            Operation::Units(_) => Family::Units,
        }
    }
}

use Direction::{Decode, Encode};

/// Operations reachable by exact id. Custom radix, unit categories and the
/// `BaseN` family are resolved by pattern instead.
pub const OPERATIONS: &[(&str, Operation)] = &[
    ("Decimal to Binary", Operation::Numeral { from: 10, to: 2 }),
    ("Binary to Decimal", Operation::Numeral { from: 2, to: 10 }),
    ("Decimal to Octal", Operation::Numeral { from: 10, to: 8 }),
    ("Octal to Decimal", Operation::Numeral { from: 8, to: 10 }),
    ("Decimal to Hexadecimal", Operation::Numeral { from: 10, to: 16 }),
    ("Hexadecimal to Decimal", Operation::Numeral { from: 16, to: 10 }),
    ("Num to Roman", Operation::Roman(Encode)),
    ("Roman to Num", Operation::Roman(Decode)),
    ("Text to Morse", Operation::Symbol(SymbolCipher::Morse, Encode)),
    ("Morse to Text", Operation::Symbol(SymbolCipher::Morse, Decode)),
    ("Text to Braille", Operation::Symbol(SymbolCipher::Braille, Encode)),
    ("Braille to Text", Operation::Symbol(SymbolCipher::Braille, Decode)),
    ("Text to Grid Cipher", Operation::Symbol(SymbolCipher::Grid, Encode)),
    ("Grid Cipher to Text", Operation::Symbol(SymbolCipher::Grid, Decode)),
    ("Text to Emoji Cipher", Operation::Symbol(SymbolCipher::Emoji, Encode)),
    ("Emoji Cipher to Text", Operation::Symbol(SymbolCipher::Emoji, Decode)),
    ("Text to Affine Cipher", Operation::Affine(Encode)),
    ("Affine Cipher to Text", Operation::Affine(Decode)),
    ("Text to Vigenere Cipher", Operation::Vigenere(Encode)),
    ("Vigenere Cipher to Text", Operation::Vigenere(Decode)),
    ("Text to ROT-N", Operation::RotN(Encode)),
    ("ROT-N to Text", Operation::RotN(Decode)),
    ("Text to ASCII", Operation::TextCode(TextCode::Ascii, Encode)),
    ("ASCII to Text", Operation::TextCode(TextCode::Ascii, Decode)),
    ("Text to UTF-N", Operation::TextCode(TextCode::Utf, Encode)),
    ("UTF-N to Text", Operation::TextCode(TextCode::Utf, Decode)),
    ("Text to ISO", Operation::TextCode(TextCode::Iso, Encode)),
    ("ISO to Text", Operation::TextCode(TextCode::Iso, Decode)),
    ("SHA-256", Operation::Hash(HashAlgorithm::Sha256)),
    ("SHA-512", Operation::Hash(HashAlgorithm::Sha512)),
    ("SHA-3", Operation::Hash(HashAlgorithm::Sha3_256)),
    ("MD5", Operation::Hash(HashAlgorithm::Md5)),
    ("CRC32", Operation::Hash(HashAlgorithm::Crc32)),
    ("Adler-32", Operation::Hash(HashAlgorithm::Adler32)),
    ("P. Checker", Operation::Check(Checker::Prime)),
    ("Divisibility Checker", Operation::Check(Checker::Divisibility)),
    ("Divisors Finder", Operation::Check(Checker::Divisors)),
    ("Factors Finder", Operation::Check(Checker::Factors)),
    ("Perfect Square Checker", Operation::Check(Checker::PerfectSquare)),
    ("Perfect Cube Checker", Operation::Check(Checker::PerfectCube)),
    ("Characters", Operation::Analyze(Analyzer::Characters)),
    ("Character Frequency", Operation::Analyze(Analyzer::CharacterFrequency)),
    ("Entropy", Operation::Analyze(Analyzer::Entropy)),
    (
        "Repeated sequences detection",
        Operation::Analyze(Analyzer::RepeatedSequences),
    ),
    ("Extract Num", Operation::Analyze(Analyzer::ExtractNumbers)),
    ("Number Frequency", Operation::Analyze(Analyzer::NumberFrequency)),
    ("Basic Statistics", Operation::Analyze(Analyzer::BasicStatistics)),
    ("Special Properties", Operation::Analyze(Analyzer::SpecialProperties)),
    ("Cipher Detection", Operation::Analyze(Analyzer::CipherDetection)),
    ("Caesar Cracker", Operation::Analyze(Analyzer::CaesarCracker)),
    ("Random Password Generator", Operation::Generate(GeneratorKind::Password)),
    ("Random Letters Generator", Operation::Generate(GeneratorKind::Letters)),
    ("Random Number Generator", Operation::Generate(GeneratorKind::Number)),
    ("Random ID Generator", Operation::Generate(GeneratorKind::Id)),
    ("Random IP adress Generator", Operation::Generate(GeneratorKind::Ip)),
    ("Coprimes Generator", Operation::Generate(GeneratorKind::Coprimes)),
];

/// Ids of the custom-radix operations, matched by substring.
pub const CUSTOM_RADIX_IDS: [(&str, Direction); 2] = [
    ("Decimal to Custom", Encode),
    ("Custom to Decimal", Decode),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = OPERATIONS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), OPERATIONS.len());
    }

    #[test]
    fn test_shapes() {
        assert_eq!(
            Operation::Numeral { from: 10, to: 2 }.shape(),
            ParameterShape::TextOnly
        );
        assert_eq!(
            Operation::Check(Checker::Divisibility).shape(),
            ParameterShape::TextAndBase
        );
        assert_eq!(
            Operation::Units(UnitCategory::Length).shape(),
            ParameterShape::TextAndTwoModes
        );
        assert_eq!(Operation::RotN(Encode).shape(), ParameterShape::TextAndKey);
        assert_eq!(
            Operation::TextCode(TextCode::Ascii, Encode).shape(),
            ParameterShape::TextOnly
        );
    }

    #[test]
    fn test_shape_check() {
        let missing = NormalizedRequest::new("Length", "5").with_mode("km");
        assert!(ParameterShape::TextAndTwoModes.check(&missing).is_err());

        let complete = missing.with_mode2("m");
        assert!(ParameterShape::TextAndTwoModes.check(&complete).is_ok());

        let no_base = NormalizedRequest::new("Divisibility Checker", "10");
        assert!(ParameterShape::TextAndBase.check(&no_base).is_err());
    }

    #[test]
    fn test_direction_from_mode() {
        assert_eq!(Direction::from_mode("Encode"), Some(Encode));
        assert_eq!(Direction::from_mode("Base → Text"), Some(Decode));
        assert_eq!(Direction::from_mode("sideways"), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(
            Operation::Analyze(Analyzer::CaesarCracker).family(),
            Family::Detection
        );
        assert_eq!(
            Operation::Analyze(Analyzer::BasicStatistics).family(),
            Family::NumericAnalysis
        );
        assert_eq!(Operation::Roman(Encode).family(), Family::Numerals);
    }
}
