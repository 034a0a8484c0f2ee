use std::collections::HashMap;

/// Symbol counts over one text, kept in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<(char, usize)>,
    index: HashMap<char, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut table = FrequencyTable {
            counts: Vec::new(),
            index: HashMap::new(),
            total: 0,
        };
        for c in chars {
            match table.index.get(&c) {
                Some(&slot) => table.counts[slot].1 += 1,
                None => {
                    table.index.insert(c, table.counts.len());
                    table.counts.push((c, 1));
                }
            }
            table.total += 1;
        }
        table
    }

    /// Number of symbols counted; equals the input length in characters.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, c: char) -> usize {
        self.index.get(&c).map_or(0, |&slot| self.counts[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// The `limit` most frequent symbols. Equal counts keep first-appearance order.
    pub fn most_common(&self, limit: usize) -> Vec<(char, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(limit);
        sorted
    }
}

/// Index of Coincidence over the letters of `text`, case-folded.
///
/// `Σ n_c(n_c - 1) / (N(N - 1))`, or `0.0` when fewer than two letters remain.
pub fn index_of_coincidence(text: &str) -> f64 {
    let letters = FrequencyTable::from_chars(
        text.chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_uppercase),
    );
    let n = letters.total();
    if n <= 1 {
        return 0.0;
    }

    let numerator: usize = letters.iter().map(|(_, count)| count * (count - 1)).sum();
    numerator as f64 / (n * (n - 1)) as f64
}

/// Shannon entropy in bits per character over the whole text.
pub fn shannon_entropy(text: &str) -> f64 {
    entropy_of(&FrequencyTable::from_text(text))
}

pub(crate) fn entropy_of(table: &FrequencyTable) -> f64 {
    let total = table.total();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let sum: f64 = table
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / n;
            p * p.log2()
        })
        .sum();
    // -0.0 for single-symbol texts
    (-sum).max(0.0)
}

/// IC, entropy and the raw frequency table for one text.
#[derive(Debug, Clone)]
pub struct TextStatistics {
    pub ic: f64,
    pub entropy: f64,
    pub frequency: FrequencyTable,
}

pub fn analyze(text: &str) -> TextStatistics {
    let frequency = FrequencyTable::from_text(text);
    TextStatistics {
        ic: index_of_coincidence(text),
        entropy: entropy_of(&frequency),
        frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_table_counts_and_order() {
        let table = FrequencyTable::from_text("banana");
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.count('a'), 3);
        assert_eq!(table.count('z'), 0);
        assert_eq!(table.iter().map(|(c, _)| c).collect::<String>(), "ban");
        assert_eq!(table.most_common(2), vec![('a', 3), ('n', 2)]);
    }

    #[test]
    fn test_most_common_ties_are_stable() {
        let table = FrequencyTable::from_text("abcabc");
        assert_eq!(table.most_common(3), vec![('a', 2), ('b', 2), ('c', 2)]);
    }

    #[test]
    fn test_ic_repeated_letter() {
        assert!((index_of_coincidence("AAAAAAAAAA") - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_ic_ignores_case_and_punctuation() {
        assert!((index_of_coincidence("a-A a!") - 1.0).abs() < EPSILON);
        assert_eq!(index_of_coincidence("a"), 0.0);
        assert_eq!(index_of_coincidence("1234"), 0.0);
    }

    #[test]
    fn test_ic_uniform_alphabet() {
        let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(40);
        assert!((index_of_coincidence(&text) - 1.0 / 26.0).abs() < 0.01);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!((shannon_entropy("ab") - 1.0).abs() < EPSILON);
        assert!((shannon_entropy("abcd") - 2.0).abs() < EPSILON);
        assert!(shannon_entropy("abcd") > shannon_entropy("aabb"));
    }

    #[test]
    fn test_analyze_combines_metrics() {
        let stats = analyze("hello");
        assert_eq!(stats.frequency.count('l'), 2);
        assert!((stats.ic - 0.1).abs() < EPSILON);
        assert!(stats.entropy > 1.9 && stats.entropy < 2.0);
    }
}
