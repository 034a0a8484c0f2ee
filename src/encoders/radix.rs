use crate::core::alphabet::Alphabet;
use crate::error::{Result, ToolkitError};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

/// Encodes bytes as one big-endian integer written in the alphabet's radix.
///
/// Each leading zero byte becomes one leading zero digit so the exact byte
/// string survives a round trip.
pub fn encode(data: &[u8], alphabet: &Alphabet) -> String {
    if data.is_empty() {
        return String::new();
    }

    let zero = digit(alphabet, 0);
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    if leading_zeros == data.len() {
        return zero.to_string().repeat(data.len());
    }

    let base = alphabet.base();
    let mut num = BigUint::from_bytes_be(&data[leading_zeros..]);

    let max_digits =
        ((data.len() - leading_zeros) * 8 * 1000) / (base as f64).log2() as usize / 1000 + 1;
    let mut result = Vec::with_capacity(max_digits + leading_zeros);

    let base_big = BigUint::from(base);

    while !num.is_zero() {
        let (quotient, remainder) = num.div_rem(&base_big);
        let digit_val = remainder.to_u64_digits().first().copied().unwrap_or(0) as usize;
        result.push(digit(alphabet, digit_val));
        num = quotient;
    }

    result.extend(std::iter::repeat_n(zero, leading_zeros));

    result.reverse();
    result.into_iter().collect()
}

/// Decodes radix text back to bytes. Empty input decodes to no bytes.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first character outside the alphabet.
pub fn decode(encoded: &str, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let base = alphabet.base();
    let base_big = BigUint::from(base);
    let mut num = BigUint::zero();
    let mut leading_zeros = 0;

    for (position, c) in encoded.chars().enumerate() {
        let value = alphabet.decode_char(c).ok_or_else(|| {
            ToolkitError::invalid(format!(
                "Invalid character '{}' at position {} for base {} (valid: {})",
                c,
                position,
                base,
                alphabet.symbols()
            ))
        })?;

        if num.is_zero() && value == 0 {
            leading_zeros += 1;
        } else {
            num *= &base_big;
            num += BigUint::from(value);
        }
    }

    if num.is_zero() {
        return Ok(vec![0u8; leading_zeros]);
    }

    let bytes = num.to_bytes_be();
    let mut result = Vec::with_capacity(leading_zeros + bytes.len());
    result.resize(leading_zeros, 0u8);
    result.extend_from_slice(&bytes);

    Ok(result)
}

fn digit(alphabet: &Alphabet, value: usize) -> char {
    match alphabet.encode_digit(value) {
        Some(c) => c,
        None => unreachable!("digit {} out of range for base {}", value, alphabet.base()),
    }
}
