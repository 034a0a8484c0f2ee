//! Integer numerals: positional radix strings and Roman numerals.

use crate::core::alphabet::RADIX62_DIGITS;
use crate::error::{Result, ToolkitError};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Num, Signed, ToPrimitive, Zero};

/// Largest radix a custom conversion accepts.
pub const MAX_CUSTOM_BASE: u32 = 62;

fn parse_integer(input: &str, radix: u32, label: &str) -> Result<BigInt> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ToolkitError::empty(label));
    }
    BigInt::from_str_radix(trimmed, radix)
        .map_err(|_| ToolkitError::invalid(format!("Invalid {} number: '{}'", label, trimmed)))
}

/// Re-expresses an integer written in `from` radix in `to` radix.
///
/// Handles radixes 2..=36 with uppercase output, for the fixed
/// decimal/binary/octal/hexadecimal conversions.
pub fn convert(input: &str, from: u32, to: u32) -> Result<String> {
    let label = match from {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    };
    let value = parse_integer(input, from, label)?;
    Ok(value.to_str_radix(to).to_uppercase())
}

fn check_custom_base(base: u32) -> Result<()> {
    if !(2..=MAX_CUSTOM_BASE).contains(&base) {
        return Err(ToolkitError::range(format!(
            "Base must be between 2 and {}, got {}",
            MAX_CUSTOM_BASE, base
        )));
    }
    Ok(())
}

/// Writes a decimal integer in any base from 2 to 62.
///
/// Digits run `0-9`, then `A-Z`, then `a-z`; a negative sign is kept in front.
///
/// # Errors
///
/// `RangeError` for a base outside 2..=62, `InvalidInput` for a non-integer.
pub fn decimal_to_custom(input: &str, base: u32) -> Result<String> {
    check_custom_base(base)?;
    let value = parse_integer(input, 10, "decimal")?;

    if value.is_zero() {
        return Ok("0".to_string());
    }

    let base_big = BigInt::from(base);
    let mut magnitude = value.abs();
    let mut digits = Vec::new();
    let symbols = RADIX62_DIGITS.as_bytes();

    while !magnitude.is_zero() {
        let (quotient, remainder) = magnitude.div_rem(&base_big);
        let index = remainder.to_usize().unwrap_or(0);
        digits.push(symbols[index] as char);
        magnitude = quotient;
    }

    if value.sign() == Sign::Minus {
        digits.push('-');
    }

    Ok(digits.into_iter().rev().collect())
}

/// Reads a number written in any base from 2 to 62 and returns it in decimal.
///
/// Up to base 36 letters are case-insensitive; above that `A` and `a` are
/// different digits.
pub fn custom_to_decimal(input: &str, base: u32) -> Result<String> {
    check_custom_base(base)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ToolkitError::empty("Number"));
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if body.is_empty() {
        return Err(ToolkitError::invalid(format!("Invalid number: '{}'", trimmed)));
    }

    let valid = &RADIX62_DIGITS[..base as usize];
    let base_big = BigInt::from(base);
    let mut value = BigInt::zero();

    for c in body.chars() {
        let lookup = if base <= 36 { c.to_ascii_uppercase() } else { c };
        let digit = valid.find(lookup).ok_or_else(|| {
            ToolkitError::invalid(format!("Invalid character '{}' for base {}", c, base))
        })?;
        value = value * &base_big + BigInt::from(digit);
    }

    if negative {
        value = -value;
    }
    Ok(value.to_string())
}

const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Formats 1..=3999 as a Roman numeral.
pub fn to_roman(input: &str) -> Result<String> {
    let value = parse_integer(input, 10, "decimal")?;
    let mut n = match value.to_u32() {
        Some(n) if (1..=3999).contains(&n) => n,
        _ => {
            return Err(ToolkitError::range(format!(
                "Number must be between 1 and 3999, got {}",
                value
            )));
        }
    };

    let mut result = String::new();
    for &(amount, symbol) in &ROMAN_TABLE {
        while n >= amount {
            result.push_str(symbol);
            n -= amount;
        }
    }
    Ok(result)
}

/// Parses a Roman numeral (case-insensitive) using the subtractive rule.
pub fn from_roman(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ToolkitError::empty("Roman numeral"));
    }

    let mut total: u64 = 0;
    let mut previous = 0u64;
    for c in trimmed.chars() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => {
                return Err(ToolkitError::invalid(format!(
                    "Invalid Roman numeral character '{}'",
                    c
                )));
            }
        };
        if previous > 0 && value > previous {
            total = total + value - 2 * previous;
        } else {
            total += value;
        }
        previous = value;
    }
    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_radix_conversions() {
        assert_eq!(convert("10", 10, 2).unwrap(), "1010");
        assert_eq!(convert("-5", 10, 2).unwrap(), "-101");
        assert_eq!(convert("255", 10, 16).unwrap(), "FF");
        assert_eq!(convert("ff", 16, 10).unwrap(), "255");
        assert_eq!(convert("777", 8, 10).unwrap(), "511");
        assert_eq!(convert("123456789012345678901234567890", 10, 16).unwrap(), "18EE90FF6C373E0EE4E3F0AD2");
    }

    #[test]
    fn test_fixed_radix_errors() {
        assert!(convert("102", 2, 10).is_err());
        assert!(convert("", 10, 2).is_err());
        assert!(convert("12.5", 10, 2).is_err());
    }

    #[test]
    fn test_custom_base() {
        assert_eq!(decimal_to_custom("255", 16).unwrap(), "FF");
        assert_eq!(decimal_to_custom("61", 62).unwrap(), "z");
        assert_eq!(decimal_to_custom("0", 7).unwrap(), "0");
        assert_eq!(decimal_to_custom("-35", 36).unwrap(), "-Z");
        assert_eq!(custom_to_decimal("ff", 16).unwrap(), "255");
        assert_eq!(custom_to_decimal("z", 62).unwrap(), "61");
        assert_eq!(custom_to_decimal("Z", 62).unwrap(), "35");
        assert_eq!(custom_to_decimal("-Z", 36).unwrap(), "-35");
    }

    #[test]
    fn test_custom_base_bounds() {
        assert_eq!(decimal_to_custom("5", 1).unwrap_err().kind(), crate::error::ErrorKind::RangeError);
        assert_eq!(custom_to_decimal("5", 63).unwrap_err().kind(), crate::error::ErrorKind::RangeError);
        assert!(custom_to_decimal("9", 8).is_err());
    }

    #[test]
    fn test_roman() {
        assert_eq!(to_roman("1994").unwrap(), "MCMXCIV");
        assert_eq!(to_roman("3999").unwrap(), "MMMCMXCIX");
        assert!(to_roman("0").is_err());
        assert!(to_roman("4000").is_err());
        assert_eq!(from_roman("MCMXCIV").unwrap(), "1994");
        assert_eq!(from_roman("xiv").unwrap(), "14");
        assert!(from_roman("MXQ").is_err());
    }
}
