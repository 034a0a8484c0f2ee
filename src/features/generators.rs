use crate::core::config::GeneratorSettings;
use crate::error::{Result, ToolkitError};
use num_integer::Integer;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const PUNCTUATION: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Largest first member of a generated coprime pair.
const COPRIME_CEILING: u64 = 1_000_000;

/// Parses a requested length or count, enforcing `min..=max`.
pub fn parse_amount(raw: &str, min: usize, max: usize, what: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ToolkitError::invalid(format!("Invalid {}: '{}'", what, trimmed)))?;
    if value < min as i64 || value > max as i64 {
        return Err(ToolkitError::range(format!(
            "{} must be between {} and {}, got {}",
            what, min, max, value
        )));
    }
    Ok(value as usize)
}

fn sample(pool: &[u8], length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .filter_map(|_| pool.choose(&mut rng).map(|&b| b as char))
        .collect()
}

/// Letters, digits and ASCII punctuation; at least 4 characters.
pub fn password(length: usize) -> String {
    let pool: Vec<u8> = [LETTERS, DIGITS, PUNCTUATION].concat();
    sample(&pool, length)
}

pub fn letters(length: usize) -> String {
    sample(LETTERS, length)
}

pub fn digits(length: usize) -> String {
    sample(DIGITS, length)
}

/// Random v4 UUIDs.
pub fn ids(count: usize) -> Vec<String> {
    (0..count).map(|_| uuid::Uuid::new_v4().to_string()).collect()
}

pub fn ipv4_addresses(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let octets: [u8; 4] = rng.random();
            format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
        })
        .collect()
}

/// Distinct pairs `(a, b)` with `b < a` and `gcd(a, b) = 1`.
///
/// Gives up after `10 * count` draws, so very large requests may return fewer.
pub fn coprime_pairs(count: usize) -> Vec<(u64, u64)> {
    let mut rng = rand::rng();
    let mut seen = HashSet::new();
    let mut pairs = Vec::with_capacity(count);
    let mut attempts = count.saturating_mul(10);

    while pairs.len() < count && attempts > 0 {
        attempts -= 1;
        let a = rng.random_range(2..=COPRIME_CEILING);
        let b = rng.random_range(1..a);
        if a.gcd(&b) == 1 && seen.insert((a, b)) {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Which generator an operation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Password,
    Letters,
    Number,
    Id,
    Ip,
    Coprimes,
}

/// Output of one generator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    Text(String),
    List(Vec<String>),
}

impl GeneratorKind {
    /// Reads the length or count from `raw` and runs the generator.
    pub fn run(&self, raw: &str, limits: &GeneratorSettings) -> Result<Generated> {
        let generated = match self {
            GeneratorKind::Password => {
                Generated::Text(password(parse_amount(raw, 4, limits.max_length, "Password length")?))
            }
            GeneratorKind::Letters => {
                Generated::Text(letters(parse_amount(raw, 4, limits.max_length, "Letter count")?))
            }
            GeneratorKind::Number => {
                Generated::Text(digits(parse_amount(raw, 1, limits.max_length, "Number length")?))
            }
            GeneratorKind::Id => Generated::List(ids(parse_amount(raw, 1, limits.max_count, "Count")?)),
            GeneratorKind::Ip => {
                Generated::List(ipv4_addresses(parse_amount(raw, 1, limits.max_count, "Count")?))
            }
            GeneratorKind::Coprimes => {
                let count = parse_amount(raw, 1, limits.max_count, "Count")?;
                Generated::List(
                    coprime_pairs(count)
                        .into_iter()
                        .map(|(a, b)| format!("({}, {})", a, b))
                        .collect(),
                )
            }
        };
        Ok(generated)
    }
}
