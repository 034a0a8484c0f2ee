use crate::error::{Result, ToolkitError};
use num_integer::Integer;

/// Affine key `y = a·x + b (mod 26)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineKey {
    pub a: i64,
    pub b: i64,
}

impl AffineKey {
    /// Builds a key reduced mod 26, rejecting multipliers that share a
    /// factor with 26.
    pub fn new(a: i64, b: i64) -> Result<Self> {
        let reduced = a.rem_euclid(26);
        if reduced.gcd(&26) != 1 {
            return Err(ToolkitError::invalid(format!(
                "Key 'a' ({}) must be coprime with 26",
                a
            )));
        }
        Ok(Self {
            a: reduced,
            b: b.rem_euclid(26),
        })
    }

    /// Parses `"a,b"`, `"a b"` or a lone `"a"` (then `b` = 0).
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let number = |s: &str| {
            s.parse::<i64>().map_err(|_| {
                ToolkitError::invalid(format!(
                    "Invalid affine key '{}': expected \"a,b\" with integers",
                    raw.trim()
                ))
            })
        };

        match parts.as_slice() {
            [a] => Self::new(number(a)?, 0),
            [a, b, ..] => Self::new(number(a)?, number(b)?),
            [] => Err(ToolkitError::invalid("Affine key cannot be empty")),
        }
    }

    fn inverse_a(&self) -> i64 {
        let (_, x, _) = egcd(self.a, 26);
        x.rem_euclid(26)
    }
}

/// Extended Euclid: returns `(g, x, y)` with `a·x + b·y = g`.
pub fn egcd(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (g, y, x) = egcd(b.rem_euclid(a), a);
        (g, x - (b.div_euclid(a)) * y, y)
    }
}

fn map_letters(text: &str, f: impl Fn(i64) -> i64) -> String {
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_uppercase() {
                b'A'
            } else if c.is_ascii_lowercase() {
                b'a'
            } else {
                return c;
            };
            let x = (c as u8 - base) as i64;
            (base + f(x).rem_euclid(26) as u8) as char
        })
        .collect()
}

pub fn encrypt(text: &str, key: AffineKey) -> String {
    map_letters(text, |x| key.a * x + key.b)
}

pub fn decrypt(text: &str, key: AffineKey) -> String {
    let a_inv = key.inverse_a();
    map_letters(text, |y| a_inv * (y - key.b))
}
