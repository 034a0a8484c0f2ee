use crate::error::{Result, ToolkitError};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A number found in text, kept as an integer when written as one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::Float(_) => None,
        }
    }

    /// Key under which equal values group, so `1` and `1.0` count together.
    fn group_key(&self) -> u64 {
        let v = self.as_f64();
        if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"-?\d+(?:\.\d+)?") {
        Ok(re) => re,
        Err(e) => unreachable!("number pattern does not compile: {}", e),
    })
}

/// All optionally-signed integers and decimals in `text`, left to right.
///
/// A trailing dot is not part of the number: `"42."` yields the integer 42.
/// Integers too large for `i64` are kept as floats.
pub fn extract_numbers(text: &str) -> Vec<Number> {
    number_pattern()
        .find_iter(text)
        .filter_map(|m| {
            let s = m.as_str();
            if s.contains('.') {
                s.parse::<f64>().ok().map(Number::Float)
            } else {
                s.parse::<i64>()
                    .map(Number::Int)
                    .or_else(|_| s.parse::<f64>().map(Number::Float))
                    .ok()
            }
        })
        .collect()
}

fn require_numbers(text: &str) -> Result<Vec<Number>> {
    let numbers = extract_numbers(text);
    if numbers.is_empty() {
        return Err(ToolkitError::invalid("No numbers found in text"));
    }
    Ok(numbers)
}

/// Sum that stays integral while every term is an integer and nothing overflows.
fn sum(numbers: &[Number]) -> Number {
    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0.0;
    for n in numbers {
        float_total += n.as_f64();
        int_total = match (int_total, n) {
            (Some(acc), Number::Int(i)) => acc.checked_add(*i),
            _ => None,
        };
    }
    int_total.map_or(Number::Float(float_total), Number::Int)
}

/// Distinct values with their counts, in order of first appearance.
fn grouped(numbers: &[Number]) -> Vec<(Number, usize)> {
    let mut slots: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<(Number, usize)> = Vec::new();
    for n in numbers {
        match slots.get(&n.group_key()) {
            Some(&slot) => groups[slot].1 += 1,
            None => {
                slots.insert(n.group_key(), groups.len());
                groups.push((*n, 1));
            }
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberFrequency {
    pub total: usize,
    pub unique: usize,
    pub most_common: Vec<(Number, usize)>,
}

pub fn number_frequency(text: &str, limit: usize) -> Result<NumberFrequency> {
    let numbers = require_numbers(text)?;
    let mut groups = grouped(&numbers);
    let unique = groups.len();
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(limit);

    Ok(NumberFrequency {
        total: numbers.len(),
        unique,
        most_common: groups,
    })
}

/// Descriptive statistics over every number in a text.
///
/// Variance and standard deviation are population values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub sum: Number,
    pub mean: f64,
    pub median: Number,
    /// Every value sharing the highest count, in order of first appearance
    pub modes: Vec<Number>,
    pub variance: f64,
    pub std_dev: f64,
}

pub fn basic_statistics(numbers: &[Number]) -> Result<NumericSummary> {
    if numbers.is_empty() {
        return Err(ToolkitError::invalid(
            "No numbers found for statistical analysis",
        ));
    }

    let n = numbers.len();
    let total = sum(numbers);
    let mean = numbers.iter().map(Number::as_f64).sum::<f64>() / n as f64;

    let mut sorted = numbers.to_vec();
    sorted.sort_by(|a, b| a.as_f64().total_cmp(&b.as_f64()));
    let median = if n % 2 == 0 {
        Number::Float((sorted[n / 2 - 1].as_f64() + sorted[n / 2].as_f64()) / 2.0)
    } else {
        sorted[n / 2]
    };

    let groups = grouped(numbers);
    let top = groups.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let modes = groups
        .into_iter()
        .filter(|(_, c)| *c == top)
        .map(|(v, _)| v)
        .collect();

    let variance = numbers
        .iter()
        .map(|x| (x.as_f64() - mean).powi(2))
        .sum::<f64>()
        / n as f64;

    Ok(NumericSummary {
        count: n,
        sum: total,
        mean,
        median,
        modes,
        variance,
        std_dev: variance.sqrt(),
    })
}

/// [`basic_statistics`] over the numbers extracted from `text`.
pub fn statistics_of_text(text: &str) -> Result<NumericSummary> {
    basic_statistics(&extract_numbers(text))
}
