//! Guessing which encoding or classical cipher produced a piece of text.
//!
//! Classification runs in tiers and stops at the first that matches:
//! character-set tests for binary, octal, hexadecimal and base64, then an
//! IC/entropy verdict. The chi-squared Caesar attack is a separate entry
//! point, also used to fill in the shift of a monoalphabetic verdict.

use crate::analysis::frequency::{self, TextStatistics};
use crate::ciphers::caesar;
use crate::core::alphabet::Alphabet;
use crate::encoders::chunked;
use crate::error::{Result, ToolkitError};
use std::fmt;

/// IC of English plaintext.
pub const IC_ENGLISH: f64 = 0.067;
/// IC of uniformly random letters, 1/26.
pub const IC_RANDOM: f64 = 1.0 / 26.0;
/// How close an IC has to be to a reference to count as a match.
pub const IC_TOLERANCE: f64 = 0.01;
/// Above this IC the text is too repetitive to be natural language.
pub const IC_REPETITIVE: f64 = 0.1;

/// Base64 is only considered for inputs longer than this.
const BASE64_MIN_LEN: usize = 20;
/// Share of decoded bytes that must be printable for a base64 verdict.
const BASE64_PRINTABLE_RATIO: f64 = 0.8;

/// English single-letter frequencies in percent, A to Z.
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Non-alphabetic encodings recognised from their character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingGuess {
    Binary,
    Octal,
    Hexadecimal,
    Base64,
}

impl EncodingGuess {
    pub fn describe(&self) -> &'static str {
        match self {
            EncodingGuess::Binary => "Looks like Binary (Base2).",
            EncodingGuess::Octal => "Looks like Octal (Base8).",
            EncodingGuess::Hexadecimal => "Looks like Hexadecimal (Base16).",
            EncodingGuess::Base64 => "Looks like Base64 encoding.",
        }
    }
}

/// Verdict of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Encoding(EncodingGuess),
    SingleRepeatingCharacter,
    HighlyRepetitive,
    Monoalphabetic,
    Polyalphabetic,
    Inconclusive,
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Conclusion::Encoding(guess) => guess.describe(),
            Conclusion::SingleRepeatingCharacter => {
                "The text consists of a single repeating character."
            }
            Conclusion::HighlyRepetitive => {
                "Very high IC. The text is highly repetitive and not standard English."
            }
            Conclusion::Monoalphabetic => {
                "High probability of being a monoalphabetic substitution cipher (e.g., Caesar, Atbash, Simple Substitution)."
            }
            Conclusion::Polyalphabetic => {
                "Likely a polyalphabetic cipher (e.g., Vigenere), modern encryption, or compressed data."
            }
            Conclusion::Inconclusive => {
                "The statistical properties are inconclusive. It might be a complex cipher, non-standard text, or too short for an accurate analysis."
            }
        };
        f.write_str(text)
    }
}

/// Result of classifying one text. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CipherClassification {
    pub conclusion: Conclusion,
    pub ic: f64,
    pub entropy: f64,
    /// Most likely Caesar shift, filled in for monoalphabetic verdicts
    pub detected_shift: Option<u8>,
}

fn is_printable(byte: u8) -> bool {
    (32..127).contains(&byte) || matches!(byte, b'\t' | b'\n' | b'\r')
}

fn looks_like_base64(cleaned: &str) -> bool {
    if cleaned.chars().count() <= BASE64_MIN_LEN {
        return false;
    }
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
    {
        return false;
    }

    let mut padded = cleaned.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    match chunked::decode(&padded, Alphabet::base64()) {
        Ok(decoded) if !decoded.is_empty() => {
            let printable = decoded.iter().filter(|&&b| is_printable(b)).count();
            printable as f64 / decoded.len() as f64 >= BASE64_PRINTABLE_RATIO
        }
        _ => false,
    }
}

/// Character-set tests, checked as binary, octal, hexadecimal, then base64.
/// Whitespace is ignored.
pub fn detect_encoding(text: &str) -> Option<EncodingGuess> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.chars().all(|c| c == '0' || c == '1') {
        Some(EncodingGuess::Binary)
    } else if cleaned.chars().all(|c| ('0'..='7').contains(&c)) {
        Some(EncodingGuess::Octal)
    } else if cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(EncodingGuess::Hexadecimal)
    } else if looks_like_base64(&cleaned) {
        Some(EncodingGuess::Base64)
    } else {
        None
    }
}

/// Statistical verdict from IC alone plus the distinct-character count.
pub fn classify_statistics(stats: &TextStatistics) -> Conclusion {
    let ic = stats.ic;
    if stats.frequency.distinct() == 1 {
        Conclusion::SingleRepeatingCharacter
    } else if ic > IC_REPETITIVE {
        Conclusion::HighlyRepetitive
    } else if (ic - IC_ENGLISH).abs() < IC_TOLERANCE {
        Conclusion::Monoalphabetic
    } else if (ic - IC_RANDOM).abs() < IC_TOLERANCE {
        Conclusion::Polyalphabetic
    } else {
        Conclusion::Inconclusive
    }
}

/// Guesses the encoding or cipher family of `text`.
///
/// # Errors
///
/// `EmptyInput` when the text is empty or only whitespace.
pub fn classify(text: &str) -> Result<CipherClassification> {
    if text.trim().is_empty() {
        return Err(ToolkitError::empty("Input"));
    }

    let stats = frequency::analyze(text);

    let conclusion = match detect_encoding(text) {
        Some(guess) => Conclusion::Encoding(guess),
        None => classify_statistics(&stats),
    };

    let detected_shift = if conclusion == Conclusion::Monoalphabetic {
        crack_caesar(text).ok().map(|crack| crack.shift)
    } else {
        None
    };

    tracing::debug!(?conclusion, ic = stats.ic, entropy = stats.entropy, "classified text");

    Ok(CipherClassification {
        conclusion,
        ic: stats.ic,
        entropy: stats.entropy,
        detected_shift,
    })
}

/// Best Caesar shift found by the chi-squared attack.
#[derive(Debug, Clone, PartialEq)]
pub struct CaesarCrack {
    pub shift: u8,
    pub chi_squared: f64,
    /// The full input decrypted with `shift`, case and punctuation intact
    pub plaintext: String,
}

/// `Σ (observed - expected)² / expected` over A..Z for `total` letters.
pub fn chi_squared(observed: &[usize; 26], total: usize) -> f64 {
    observed
        .iter()
        .zip(ENGLISH_FREQUENCIES.iter())
        .filter_map(|(&count, &percent)| {
            let expected = total as f64 * percent / 100.0;
            (expected > 0.0).then(|| (count as f64 - expected).powi(2) / expected)
        })
        .sum()
}

/// Tries all 26 shifts and keeps the one whose letter distribution is closest
/// to English. Ties go to the smallest shift.
///
/// # Errors
///
/// `InvalidInput` when the text has no ASCII letters.
pub fn crack_caesar(text: &str) -> Result<CaesarCrack> {
    let mut counts = [0usize; 26];
    let mut total = 0;
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        counts[(c.to_ascii_uppercase() as u8 - b'A') as usize] += 1;
        total += 1;
    }
    if total == 0 {
        return Err(ToolkitError::invalid("No alphabetic characters to analyze"));
    }

    let mut best_shift = 0u8;
    let mut best_score = f64::INFINITY;
    for shift in 0..26u8 {
        // Decrypting by `shift` turns cipher letter (i + shift) into plain letter i
        let mut observed = [0usize; 26];
        for (i, slot) in observed.iter_mut().enumerate() {
            *slot = counts[(i + shift as usize) % 26];
        }
        let score = chi_squared(&observed, total);
        if score < best_score {
            best_score = score;
            best_shift = shift;
        }
    }

    Ok(CaesarCrack {
        shift: best_shift,
        chi_squared: best_score,
        plaintext: caesar::decrypt(text, best_shift as i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "It is a truth universally acknowledged, that a single man in \
        possession of a good fortune, must be in want of a wife. However little known the \
        feelings or views of such a man may be on his first entering a neighbourhood, this \
        truth is so well fixed in the minds of the surrounding families.";

    #[test]
    fn test_frequency_table_sums_to_100() {
        let total: f64 = ENGLISH_FREQUENCIES.iter().sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_crack_recovers_every_shift() {
        for shift in [1, 3, 13, 25] {
            let encrypted = caesar::encrypt(SAMPLE, shift);
            let crack = crack_caesar(&encrypted).unwrap();
            assert_eq!(crack.shift as i64, shift);
            assert_eq!(crack.plaintext, SAMPLE);
        }
    }

    #[test]
    fn test_crack_needs_letters() {
        assert!(crack_caesar("1234 !!").is_err());
    }

    #[test]
    fn test_encoding_tiers() {
        assert_eq!(detect_encoding("0101 1100"), Some(EncodingGuess::Binary));
        assert_eq!(detect_encoding("0755 644"), Some(EncodingGuess::Octal));
        assert_eq!(detect_encoding("DEADbeef 09"), Some(EncodingGuess::Hexadecimal));
        assert_eq!(
            detect_encoding("SGVsbG8sIFdvcmxkISBUaGlzIGlzIGJhc2U2NA=="),
            Some(EncodingGuess::Base64)
        );
        assert_eq!(detect_encoding("SGVsbG8="), None);
        assert_eq!(detect_encoding("hello world"), None);
    }

    #[test]
    fn test_base64_needs_printable_payload() {
        // Decodes to mostly control bytes
        assert_eq!(detect_encoding("////////////////////////"), None);
    }

    #[test]
    fn test_classification_statistics() {
        let single = classify("zzzzzz").unwrap();
        assert_eq!(single.conclusion, Conclusion::SingleRepeatingCharacter);
        assert!((single.ic - 1.0).abs() < 1e-9);

        assert_eq!(classify("xyxy xyxy").unwrap().conclusion, Conclusion::HighlyRepetitive);

        let uniform = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(20) + "!";
        assert_eq!(classify(&uniform).unwrap().conclusion, Conclusion::Polyalphabetic);
    }

    #[test]
    fn test_metrics_come_from_text_statistics() {
        let stats = frequency::analyze(SAMPLE);
        let result = classify(SAMPLE).unwrap();
        assert_eq!(result.ic, stats.ic);
        assert_eq!(result.entropy, stats.entropy);
        assert_eq!(classify_statistics(&stats), result.conclusion);
    }

    #[test]
    fn test_monoalphabetic_reports_shift() {
        let encrypted = caesar::encrypt(SAMPLE, 7);
        let result = classify(&encrypted).unwrap();
        assert_eq!(result.conclusion, Conclusion::Monoalphabetic);
        assert_eq!(result.detected_shift, Some(7));
    }

    #[test]
    fn test_encoding_verdict_still_reports_metrics() {
        let result = classify("0110 1001").unwrap();
        assert_eq!(result.conclusion, Conclusion::Encoding(EncodingGuess::Binary));
        assert!(result.entropy > 0.0);
        assert_eq!(result.detected_shift, None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            classify("  \n").unwrap_err().kind(),
            crate::error::ErrorKind::EmptyInput
        );
    }
}
