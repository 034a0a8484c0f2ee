//! Integer properties: primality, divisors, factorization and digit patterns.

use crate::error::{Result, ToolkitError};
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::{Signed, Zero};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Largest input accepted by [`prime_factors`].
pub const FACTORIZATION_LIMIT: u64 = 1_000_000_000_000_000_000;

/// Parses a whole, optionally signed integer of any size.
pub fn parse_integer(text: &str) -> Result<BigInt> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ToolkitError::empty("Number"));
    }
    trimmed
        .parse::<BigInt>()
        .map_err(|_| ToolkitError::invalid(format!("Invalid integer: '{}'", trimmed)))
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin for the full `u64` range.
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Prime factors in ascending order, possibly cut short by the time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorization {
    pub factors: Vec<u64>,
    /// Set when the budget ran out before the cofactor was resolved
    pub truncated: bool,
}

/// Trial-division factorization with a cooperative wall-clock cutoff.
///
/// The clock is polled every few thousand candidates; once `budget` is spent
/// the factors found so far are returned with `truncated` set.
///
/// # Errors
///
/// `RangeError` for `n < 2` or `n > 10^18`.
pub fn prime_factors(n: u64, budget: Duration) -> Result<Factorization> {
    const POLL_EVERY: u64 = 4096;

    if n < 2 {
        return Err(ToolkitError::range(format!(
            "No prime factors for numbers less than 2, got {}",
            n
        )));
    }
    if n > FACTORIZATION_LIMIT {
        return Err(ToolkitError::range(format!(
            "{} is too large for prime factorization (limit 10^18)",
            n
        )));
    }

    let started = Instant::now();
    let mut factors = Vec::new();
    let mut rest = n;

    while rest % 2 == 0 {
        factors.push(2);
        rest /= 2;
    }

    let mut candidate = 3u64;
    let mut steps = 0u64;
    let mut rest_is_prime = is_prime(rest);
    while rest > 1 && !rest_is_prime && candidate.saturating_mul(candidate) <= rest {
        if steps % POLL_EVERY == 0 && started.elapsed() >= budget {
            tracing::warn!(n, ?budget, "prime factorization truncated");
            return Ok(Factorization {
                factors,
                truncated: true,
            });
        }
        steps += 1;

        if rest % candidate == 0 {
            factors.push(candidate);
            rest /= candidate;
            rest_is_prime = is_prime(rest);
        } else {
            candidate += 2;
        }
    }
    if rest > 1 {
        factors.push(rest);
    }

    Ok(Factorization {
        factors,
        truncated: false,
    })
}

/// Every positive divisor of `|n|`, ascending. `None` for zero, which every
/// non-zero integer divides.
pub fn divisors(n: i64, budget: Duration) -> Result<Option<Vec<u64>>> {
    let magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return Ok(None);
    }
    if magnitude == 1 {
        return Ok(Some(vec![1]));
    }

    let factorization = prime_factors(magnitude, budget)?;
    if factorization.truncated {
        return Err(truncation_error(&factorization.factors, budget));
    }

    let mut result = vec![1u64];
    let mut i = 0;
    let factors = factorization.factors;
    while i < factors.len() {
        let p = factors[i];
        let multiplicity = factors[i..].iter().take_while(|&&f| f == p).count();
        let current = result.clone();
        let mut power = 1u64;
        for _ in 0..multiplicity {
            power *= p;
            result.extend(current.iter().map(|d| d * power));
        }
        i += multiplicity;
    }
    result.sort_unstable();
    Ok(Some(result))
}

/// Divisors of `n` excluding `n` itself; empty for `n <= 1`.
pub fn proper_divisors(n: i64, budget: Duration) -> Result<Vec<u64>> {
    if n <= 1 {
        return Ok(Vec::new());
    }
    let mut all = divisors(n, budget)?.unwrap_or_default();
    all.pop();
    Ok(all)
}

/// Error describing a factorization that ran out of time.
pub fn truncation_error(partial: &[u64], budget: Duration) -> ToolkitError {
    let listed: Vec<String> = partial.iter().map(|f| f.to_string()).collect();
    ToolkitError::TimeoutTruncated(format!(
        "[{}] ... (timed out after {}s)",
        listed.join(", "),
        budget.as_secs()
    ))
}

pub fn is_divisible(n: &BigInt, divisor: &BigInt) -> Result<bool> {
    if divisor.is_zero() {
        return Err(ToolkitError::invalid(format!(
            "Division by zero: cannot test {} against divisor 0",
            n
        )));
    }
    Ok((n % divisor).is_zero())
}

pub fn is_perfect_square(n: &BigInt) -> bool {
    if n.is_negative() {
        return false;
    }
    let root = n.sqrt();
    &root * &root == *n
}

pub fn is_perfect_cube(n: &BigInt) -> bool {
    let root = n.cbrt();
    &root * &root * &root == *n
}

/// Where the sum of proper divisors falls relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorClass {
    Perfect,
    Abundant,
    Deficient,
}

/// Zero and one are never perfect; one is deficient.
pub fn classify_divisor_sum(n: i64, proper: &[u64]) -> DivisorClass {
    let total: u128 = proper.iter().map(|&d| d as u128).sum();
    let target = n.max(0) as u128;
    if total == target && n > 1 {
        DivisorClass::Perfect
    } else if total > target {
        DivisorClass::Abundant
    } else {
        DivisorClass::Deficient
    }
}

pub fn is_perfect(n: i64, budget: Duration) -> Result<bool> {
    Ok(classify_divisor_sum(n, &proper_divisors(n, budget)?) == DivisorClass::Perfect)
}

fn digits(n: i64) -> Vec<u32> {
    n.unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect()
}

/// Equal to the sum of its digits each raised to the digit count.
pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let ds = digits(n);
    let order = ds.len() as u32;
    let total: u128 = ds.iter().map(|&d| (d as u128).pow(order)).sum();
    total == n as u128
}

/// Reaches 1 under repeated sum-of-squared-digits.
pub fn is_happy(n: i64) -> bool {
    if n <= 0 {
        return false;
    }
    let mut seen = HashSet::new();
    let mut current = n as u64;
    while current != 1 && seen.insert(current) {
        current = current
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| (d * d) as u64)
            .sum();
    }
    current == 1
}

/// The decimal form, sign included, reads the same both ways.
pub fn is_palindrome(n: i64) -> bool {
    let s = n.to_string();
    s.chars().eq(s.chars().rev())
}

pub fn is_triangular(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let value = BigInt::from(n) * 8 + 1;
    is_perfect_square(&value)
}

pub fn is_fibonacci(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let target = n as u128;
    let (mut a, mut b) = (0u128, 1u128);
    while a < target {
        let next = a + b;
        a = b;
        b = next;
    }
    a == target
}

pub fn has_non_decreasing_digits(n: i64) -> bool {
    digits(n).windows(2).all(|w| w[0] <= w[1])
}

pub fn has_non_increasing_digits(n: i64) -> bool {
    digits(n).windows(2).all(|w| w[0] >= w[1])
}

/// The decimal form uses only the digits 0 and 1.
pub fn is_binary_string(n: i64) -> bool {
    n.to_string().chars().all(|c| c == '0' || c == '1')
}

/// Every property reported for one integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialProperties {
    pub number: i64,
    pub prime: bool,
    pub divisor_class: DivisorClass,
    pub happy: bool,
    pub palindrome: bool,
    pub perfect_square: bool,
    pub perfect_cube: bool,
    pub binary_string: bool,
    pub non_decreasing_digits: bool,
    pub non_increasing_digits: bool,
    pub fibonacci: bool,
    pub armstrong: bool,
    pub triangular: bool,
    pub proper_divisors: Vec<u64>,
}

pub fn special_properties(n: i64, budget: Duration) -> Result<SpecialProperties> {
    let proper = proper_divisors(n, budget)?;
    let big = BigInt::from(n);

    Ok(SpecialProperties {
        number: n,
        prime: n > 1 && is_prime(n as u64),
        divisor_class: classify_divisor_sum(n, &proper),
        happy: is_happy(n),
        palindrome: is_palindrome(n),
        perfect_square: is_perfect_square(&big),
        perfect_cube: is_perfect_cube(&big),
        binary_string: is_binary_string(n),
        non_decreasing_digits: has_non_decreasing_digits(n),
        non_increasing_digits: has_non_increasing_digits(n),
        fibonacci: is_fibonacci(n),
        armstrong: is_armstrong(n),
        triangular: is_triangular(n),
        proper_divisors: proper,
    })
}
