use super::frequency::{FrequencyTable, entropy_of};
use crate::error::{Result, ToolkitError};
use std::collections::HashMap;

/// Counts by character class.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    pub total: usize,
    /// Spaces, tabs and newlines
    pub whitespace: usize,
    pub non_whitespace: usize,
    pub digits: usize,
    pub letters: usize,
    pub uppercase: usize,
    pub lowercase: usize,
    pub punctuation: usize,
    pub lines: usize,
    pub words: usize,
    pub average_word_length: f64,
}

pub fn character_stats(text: &str) -> Result<CharacterStats> {
    if text.is_empty() {
        return Err(ToolkitError::empty("Text"));
    }

    let total = text.chars().count();
    let whitespace = text.chars().filter(|c| matches!(c, ' ' | '\t' | '\n')).count();
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let average_word_length = if words.is_empty() {
        0.0
    } else {
        word_chars as f64 / words.len() as f64
    };

    Ok(CharacterStats {
        total,
        whitespace,
        non_whitespace: total - whitespace,
        digits: text.chars().filter(|c| c.is_numeric()).count(),
        letters: text.chars().filter(|c| c.is_alphabetic()).count(),
        uppercase: text.chars().filter(|c| c.is_uppercase()).count(),
        lowercase: text.chars().filter(|c| c.is_lowercase()).count(),
        punctuation: text.chars().filter(|c| c.is_ascii_punctuation()).count(),
        lines: text.matches('\n').count() + 1,
        words: words.len(),
        average_word_length,
    })
}

/// Frequency profile of a text with its most common characters.
#[derive(Debug, Clone)]
pub struct CharacterFrequency {
    pub total: usize,
    pub unique: usize,
    pub letters: usize,
    pub digits: usize,
    pub whitespace: usize,
    pub punctuation: usize,
    pub other: usize,
    pub entropy: f64,
    pub most_common: Vec<(char, usize)>,
}

impl CharacterFrequency {
    /// Share of `count` in the whole text, in percent.
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

pub fn character_frequency(text: &str, limit: usize) -> Result<CharacterFrequency> {
    if text.is_empty() {
        return Err(ToolkitError::empty("Text"));
    }

    let table = FrequencyTable::from_text(text);
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    let digits = text.chars().filter(|c| c.is_numeric()).count();
    let whitespace = text.chars().filter(|c| c.is_whitespace()).count();
    let punctuation = text.chars().filter(|c| c.is_ascii_punctuation()).count();

    Ok(CharacterFrequency {
        total: table.total(),
        unique: table.distinct(),
        letters,
        digits,
        whitespace,
        punctuation,
        other: table
            .total()
            .saturating_sub(letters + digits + whitespace + punctuation),
        entropy: entropy_of(&table),
        most_common: table.most_common(limit),
    })
}

/// Substrings of `min_len..=max_len` characters that occur more than once.
///
/// Occurrences are counted without overlap. Blank substrings are skipped.
/// Results are ordered by count, then by length, both descending, and cut
/// to `limit`.
pub fn repeated_sequences(
    text: &str,
    min_len: usize,
    max_len: usize,
    limit: usize,
) -> Vec<(String, usize)> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    if char_len < min_len * 2 {
        return Vec::new();
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut found: Vec<(&str, usize)> = Vec::new();

    for len in min_len..=max_len.min(char_len / 2) {
        for start in 0..=(char_len - len) {
            let sequence = &text[boundaries[start]..boundaries[start + len]];
            if sequence.trim().is_empty() || seen.contains_key(sequence) {
                continue;
            }
            let count = text.matches(sequence).count();
            seen.insert(sequence, count);
            if count > 1 {
                found.push((sequence, count));
            }
        }
    }

    found.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
    });
    found.truncate(limit);
    found.into_iter().map(|(s, c)| (s.to_string(), c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_stats() {
        let stats = character_stats("Hello World!\nIt is 2024.").unwrap();
        assert_eq!(stats.total, 24);
        assert_eq!(stats.whitespace, 4);
        assert_eq!(stats.non_whitespace, 20);
        assert_eq!(stats.digits, 4);
        assert_eq!(stats.letters, 14);
        assert_eq!(stats.uppercase, 3);
        assert_eq!(stats.lowercase, 11);
        assert_eq!(stats.punctuation, 2);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.words, 5);
        assert!((stats.average_word_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(character_stats("").is_err());
        assert!(character_frequency("", 20).is_err());
    }

    #[test]
    fn test_character_frequency() {
        let freq = character_frequency("aab c!", 2).unwrap();
        assert_eq!(freq.total, 6);
        assert_eq!(freq.unique, 5);
        assert_eq!(freq.letters, 4);
        assert_eq!(freq.whitespace, 1);
        assert_eq!(freq.punctuation, 1);
        assert_eq!(freq.other, 0);
        assert_eq!(freq.most_common, vec![('a', 2), ('b', 1)]);
        assert!((freq.percentage(2) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_sequences() {
        let found = repeated_sequences("abcabcabc", 2, 10, 15);
        assert_eq!(found[0], ("abc".to_string(), 3));
        assert_eq!(found[1], ("ab".to_string(), 3));
        assert_eq!(found.len(), 6);
        assert!(found.iter().all(|(s, _)| s.len() <= 4));
    }

    #[test]
    fn test_repeated_sequences_short_text() {
        assert!(repeated_sequences("abc", 2, 10, 15).is_empty());
        assert!(repeated_sequences("    ", 2, 10, 15).is_empty());
    }
}
