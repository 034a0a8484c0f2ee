//! Runs a resolved [`Operation`] against the library and shapes its output.

use super::normalize::NormalizedRequest;
use super::operation::{Analyzer, Checker, Direction, Operation, SymbolCipher, TextCode};
use super::result::{Report, Section, Value};
use crate::analysis::{characters, frequency, numbers, properties};
use crate::ciphers::{AffineKey, affine, caesar, symbols, vigenere};
use crate::core::config::Settings;
use crate::encoders::{ByteBase, numeral, text_codes};
use crate::error::{Result, ToolkitError};
use crate::features::{detection, hashing, units};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

pub(super) fn execute(
    operation: Operation,
    request: &NormalizedRequest,
    settings: &Settings,
) -> Result<Value> {
    let text = request.text();
    match operation {
        Operation::Numeral { from, to } => numeral::convert(text, from, to).map(Value::Text),
        Operation::CustomRadix(direction) => {
            let base = custom_base(request.base())?;
            match direction {
                Direction::Encode => numeral::decimal_to_custom(text, base),
                Direction::Decode => numeral::custom_to_decimal(text, base),
            }
            .map(Value::Text)
        }
        Operation::Roman(Direction::Encode) => numeral::to_roman(text).map(Value::Text),
        Operation::Roman(Direction::Decode) => numeral::from_roman(text).map(Value::Text),
        Operation::ByteEncoding(base, direction) => byte_encoding(base, direction, text),
        Operation::Symbol(cipher, direction) => Ok(Value::Text(symbol(cipher, direction, text))),
        Operation::RotN(direction) => {
            let shift = caesar::parse_shift(request.base())?;
            Ok(Value::Text(match direction {
                Direction::Encode => caesar::encrypt(text, shift),
                Direction::Decode => caesar::decrypt(text, shift),
            }))
        }
        Operation::Affine(direction) => {
            let key = AffineKey::parse(
                request
                    .base()
                    .unwrap_or(settings.ciphers.affine_default_key.as_str()),
            )?;
            Ok(Value::Text(match direction {
                Direction::Encode => affine::encrypt(text, key),
                Direction::Decode => affine::decrypt(text, key),
            }))
        }
        Operation::Vigenere(direction) => {
            let key = request.base().unwrap_or("");
            match direction {
                Direction::Encode => vigenere::encrypt(text, key),
                Direction::Decode => vigenere::decrypt(text, key),
            }
            .map(Value::Text)
        }
        Operation::TextCode(code, direction) => text_code(code, direction, text, request.base()),
        Operation::Hash(algorithm) => hashing::hash_text(text, algorithm).map(Value::Text),
        Operation::Generate(kind) => Ok(match kind.run(text, &settings.generators)? {
            crate::features::Generated::Text(s) => Value::Text(s),
            crate::features::Generated::List(items) => Value::Sequence(items),
        }),
        Operation::Check(checker) => check(checker, text, request.base(), settings),
        Operation::Analyze(analyzer) => analyze(analyzer, text, settings),
        Operation::Units(category) => {
            let (from, to) = match (request.mode(), request.mode2()) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    return Err(ToolkitError::invalid(
                        "Please select both source and target units",
                    ));
                }
            };
            let converted = units::convert_text(category, text, from, to)?;
            Ok(Value::Text(numbers::Number::Float(converted).to_string()))
        }
    }
}

fn custom_base(raw: Option<&str>) -> Result<u32> {
    let raw = raw.ok_or_else(|| ToolkitError::invalid("A base is required for Custom conversion"))?;
    let base: i64 = raw
        .parse()
        .map_err(|_| ToolkitError::invalid(format!("Invalid base for Custom conversion: '{}'", raw)))?;
    u32::try_from(base).map_err(|_| {
        ToolkitError::range(format!(
            "Base must be between 2 and {}, got {}",
            numeral::MAX_CUSTOM_BASE,
            base
        ))
    })
}

/// Invisible format characters and private-use code points.
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00AD}'
                | '\u{0600}'..='\u{0605}'
                | '\u{061C}'
                | '\u{06DD}'
                | '\u{070F}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206F}'
                | '\u{E000}'..='\u{F8FF}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
                | '\u{E0001}'
                | '\u{E0020}'..='\u{E007F}'
                | '\u{F0000}'..='\u{10FFFF}'
        )
}

/// Printable text with no whitespace is taken as plain text to encode.
fn infer_direction(text: &str) -> Direction {
    if text.chars().all(|c| !is_unprintable(c) && !c.is_whitespace()) {
        Direction::Encode
    } else {
        Direction::Decode
    }
}

fn byte_encoding(base: ByteBase, direction: Option<Direction>, text: &str) -> Result<Value> {
    let direction = direction.unwrap_or_else(|| infer_direction(text));
    tracing::debug!(base = base.id(), ?direction, "byte encoding");
    match direction {
        Direction::Encode => Ok(Value::Text(base.encode_text(text))),
        Direction::Decode => base.decode_text(text).map(Value::Text),
    }
}

fn symbol(cipher: SymbolCipher, direction: Direction, text: &str) -> String {
    match (cipher, direction) {
        (SymbolCipher::Morse, Direction::Encode) => symbols::text_to_morse(text),
        (SymbolCipher::Morse, Direction::Decode) => symbols::morse_to_text(text),
        (SymbolCipher::Braille, Direction::Encode) => symbols::text_to_braille(text),
        (SymbolCipher::Braille, Direction::Decode) => symbols::braille_to_text(text),
        (SymbolCipher::Grid, Direction::Encode) => symbols::text_to_grid(text),
        (SymbolCipher::Grid, Direction::Decode) => symbols::grid_to_text(text),
        (SymbolCipher::Emoji, Direction::Encode) => symbols::text_to_emoji(text),
        (SymbolCipher::Emoji, Direction::Decode) => symbols::emoji_to_text(text),
    }
}

fn text_code(
    code: TextCode,
    direction: Direction,
    text: &str,
    shift: Option<&str>,
) -> Result<Value> {
    let shift = shift
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ToolkitError::invalid(format!("Invalid shift value: '{}'", raw)))
        })
        .transpose()?;

    match (code, direction) {
        (TextCode::Ascii, Direction::Encode) => text_codes::ascii_encode(text),
        (TextCode::Ascii, Direction::Decode) => text_codes::ascii_decode(text),
        (TextCode::Utf, Direction::Encode) => text_codes::utf_encode(text, shift),
        (TextCode::Utf, Direction::Decode) => text_codes::utf_decode(text, shift),
        (TextCode::Iso, Direction::Encode) => text_codes::iso_encode(text, shift),
        (TextCode::Iso, Direction::Decode) => text_codes::iso_decode(text, shift),
    }
    .map(Value::Text)
}

fn truth(value: bool) -> Value {
    Value::Text(if value { "True" } else { "False" }.to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn list<T: ToString>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

fn to_i64(n: &BigInt) -> Result<i64> {
    n.to_i64()
        .ok_or_else(|| ToolkitError::range(format!("{} is outside the supported integer range", n)))
}

fn check(checker: Checker, text: &str, base: Option<&str>, settings: &Settings) -> Result<Value> {
    let budget = settings.analysis.factorization_timeout();
    let n = properties::parse_integer(text)?;

    match checker {
        Checker::Prime => {
            if n < BigInt::from(2) {
                return Ok(truth(false));
            }
            let small = n.to_u64().ok_or_else(|| {
                ToolkitError::range(format!("{} is too large for the primality test", n))
            })?;
            Ok(truth(properties::is_prime(small)))
        }
        Checker::Divisibility => {
            let divisor = properties::parse_integer(base.unwrap_or(""))?;
            properties::is_divisible(&n, &divisor).map(truth)
        }
        Checker::Divisors => match properties::divisors(to_i64(&n)?, budget)? {
            None => Ok(Value::Text("All integers except 0".to_string())),
            Some(found) => Ok(Value::Sequence(found.iter().map(u64::to_string).collect())),
        },
        Checker::Factors => {
            if n < BigInt::from(2) {
                return Err(ToolkitError::range(format!(
                    "No prime factors for numbers less than 2, got {}",
                    n
                )));
            }
            let small = n.to_u64().ok_or_else(|| {
                ToolkitError::range(format!(
                    "{} is too large for prime factorization (limit 10^18)",
                    n
                ))
            })?;
            let factorization = properties::prime_factors(small, budget)?;
            if factorization.truncated {
                return Err(properties::truncation_error(&factorization.factors, budget));
            }
            Ok(Value::Sequence(
                factorization.factors.iter().map(u64::to_string).collect(),
            ))
        }
        Checker::PerfectSquare => Ok(truth(properties::is_perfect_square(&n))),
        Checker::PerfectCube => Ok(truth(properties::is_perfect_cube(&n))),
    }
}

fn fixed(value: f64, settings: &Settings) -> String {
    format!("{:.*}", settings.render.float_precision, value)
}

fn analyze(analyzer: Analyzer, text: &str, settings: &Settings) -> Result<Value> {
    let limits = &settings.analysis;
    let report = match analyzer {
        Analyzer::Characters => {
            let stats = characters::character_stats(text)?;
            Report::new().section(
                Section::new("CHARACTER STATISTICS")
                    .entry("Total characters", stats.total)
                    .entry("Whitespace characters", stats.whitespace)
                    .entry("Non-whitespace characters", stats.non_whitespace)
                    .entry("Digits", stats.digits)
                    .entry("Letters", stats.letters)
                    .entry("Uppercase letters", stats.uppercase)
                    .entry("Lowercase letters", stats.lowercase)
                    .entry("Punctuation marks", stats.punctuation)
                    .entry("Lines", stats.lines)
                    .entry("Words", stats.words)
                    .entry(
                        "Average word length",
                        format!("{:.2}", stats.average_word_length),
                    ),
            )
        }
        Analyzer::CharacterFrequency => {
            let freq = characters::character_frequency(text, limits.most_common_limit)?;
            let mut common = Section::new("MOST COMMON CHARACTERS");
            for &(c, count) in &freq.most_common {
                common = common.entry(
                    format!("'{}'", c.escape_debug()),
                    format!("{} ({:.2}%)", count, freq.percentage(count)),
                );
            }
            Report::new()
                .section(
                    Section::new("CHARACTER FREQUENCY ANALYSIS")
                        .entry("Total characters", freq.total)
                        .entry("Unique characters", freq.unique)
                        .entry("Letters", freq.letters)
                        .entry("Digits", freq.digits)
                        .entry("Whitespace", freq.whitespace)
                        .entry("Punctuation", freq.punctuation)
                        .entry("Other characters", freq.other)
                        .entry(
                            "Shannon entropy",
                            format!("{} bits/character", fixed(freq.entropy, settings)),
                        ),
                )
                .section(common)
        }
        Analyzer::Entropy => {
            if text.is_empty() {
                return Err(ToolkitError::empty("Text"));
            }
            let table = frequency::FrequencyTable::from_text(text);
            let entropy = frequency::shannon_entropy(text);
            let interpretation = if entropy < 2.0 {
                "Low entropy (predictable text)"
            } else if entropy < 4.0 {
                "Medium entropy (mixed content)"
            } else {
                "High entropy (random-looking data)"
            };
            Report::new()
                .section(
                    Section::new("ENTROPY ANALYSIS")
                        .entry("Total characters", table.total())
                        .entry("Unique characters", table.distinct())
                        .entry(
                            "Shannon entropy",
                            format!("{} bits/character", fixed(entropy, settings)),
                        )
                        .entry("Interpretation", interpretation),
                )
                .section(
                    Section::new("ENTROPY REFERENCE")
                        .entry("English text", "~4.0-4.5 bits/character")
                        .entry("Random text", "~6.6 bits/character (for 95 printable ASCII)")
                        .entry("Binary data", "~8.0 bits/character"),
                )
        }
        Analyzer::RepeatedSequences => {
            let found = characters::repeated_sequences(text, 2, 10, limits.repeated_sequence_limit);
            if found.is_empty() {
                return Ok(Value::Text("No repeated sequences found".to_string()));
            }
            let mut section = Section::new("REPEATED SEQUENCES");
            for (sequence, count) in &found {
                section = section.entry(
                    format!("'{}'", sequence.escape_debug()),
                    format!("{} occurrences", count),
                );
            }
            Report::new().section(section)
        }
        Analyzer::ExtractNumbers => {
            let found = numbers::extract_numbers(text);
            let shown = limits.extract_display_limit;
            let message = if found.len() <= shown {
                format!("Extracted numbers: {}", list(&found))
            } else {
                format!(
                    "Extracted {} numbers. First {}: {}",
                    found.len(),
                    shown,
                    list(&found[..shown])
                )
            };
            return Ok(Value::Text(message));
        }
        Analyzer::NumberFrequency => {
            let freq = numbers::number_frequency(text, limits.number_frequency_limit)?;
            let mut common = Section::new("MOST COMMON NUMBERS");
            for (number, count) in &freq.most_common {
                common = common.entry(
                    number.to_string(),
                    format!(
                        "{} occurrences ({:.2}%)",
                        count,
                        *count as f64 * 100.0 / freq.total as f64
                    ),
                );
            }
            Report::new()
                .section(Section::new("NUMBER FREQUENCY ANALYSIS").entry("Unique numbers", freq.unique))
                .section(common)
        }
        Analyzer::BasicStatistics => {
            let stats = numbers::statistics_of_text(text)?;
            Report::new().section(
                Section::new("BASIC STATISTICS")
                    .entry("Count", stats.count)
                    .entry("Sum", stats.sum)
                    .entry("Mean", fixed(stats.mean, settings))
                    .entry("Median", stats.median)
                    .entry(
                        "Mode(s)",
                        stats
                            .modes
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", "),
                    )
                    .entry("Variance", fixed(stats.variance, settings))
                    .entry("Standard Deviation", fixed(stats.std_dev, settings)),
            )
        }
        Analyzer::SpecialProperties => {
            let n = numbers::extract_numbers(text)
                .first()
                .and_then(numbers::Number::as_int)
                .ok_or_else(|| {
                    ToolkitError::invalid("No valid integer found at the start of the text.")
                })?;
            let props = properties::special_properties(n, limits.factorization_timeout())?;
            let class = props.divisor_class;
            Report::new().section(
                Section::new(format!("SPECIAL NUMBER PROPERTIES OF {}", n))
                    .entry("Is Prime", yes_no(props.prime))
                    .entry("Is Perfect", yes_no(class == properties::DivisorClass::Perfect))
                    .entry("Is Abundant", yes_no(class == properties::DivisorClass::Abundant))
                    .entry("Is Deficient", yes_no(class == properties::DivisorClass::Deficient))
                    .entry("Is Happy", yes_no(props.happy))
                    .entry("Is Palindromic", yes_no(props.palindrome))
                    .entry("Is Perfect Square", yes_no(props.perfect_square))
                    .entry("Is Perfect Cube", yes_no(props.perfect_cube))
                    .entry("Is Binary (string)", yes_no(props.binary_string))
                    .entry("Has Increasing Digits", yes_no(props.non_decreasing_digits))
                    .entry("Has Decreasing Digits", yes_no(props.non_increasing_digits))
                    .entry("Is Fibonacci", yes_no(props.fibonacci))
                    .entry("Is Narcissistic (Armstrong)", yes_no(props.armstrong))
                    .entry("Is Triangular", yes_no(props.triangular))
                    .entry(
                        "Proper Divisors",
                        if props.proper_divisors.is_empty() {
                            "None".to_string()
                        } else {
                            list(&props.proper_divisors)
                        },
                    ),
            )
        }
        Analyzer::CipherDetection => {
            let result = detection::classify(text)?;
            let mut section = Section::new("CIPHER DETECTION")
                .entry(
                    "Index of Coincidence (IC)",
                    format!(
                        "{} (Random is ~0.038, English is ~0.067)",
                        fixed(result.ic, settings)
                    ),
                )
                .entry(
                    "Shannon Entropy",
                    format!(
                        "{} bits/char (English is ~4.0-4.5, Random is >7.5)",
                        fixed(result.entropy, settings)
                    ),
                )
                .entry("Conclusion", result.conclusion);
            if let Some(shift) = result.detected_shift {
                section = section.entry("Likely Caesar shift", shift);
            }
            Report::new().section(section)
        }
        Analyzer::CaesarCracker => {
            let crack = detection::crack_caesar(text)?;
            Report::new().section(
                Section::new("CAESAR CRACKER")
                    .entry("Shift", crack.shift)
                    .entry("Chi-squared", fixed(crack.chi_squared, settings))
                    .entry("Plaintext", crack.plaintext),
            )
        }
    };
    Ok(Value::Mapping(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(operation: Operation, request: NormalizedRequest) -> Result<Value> {
        execute(operation, &request, &Settings::default())
    }

    #[test]
    fn test_direction_heuristic() {
        assert_eq!(infer_direction("hello"), Direction::Encode);
        assert_eq!(infer_direction("01101000 01101001"), Direction::Decode);
        assert_eq!(infer_direction("héllo✓"), Direction::Encode);
    }

    #[test]
    fn test_format_characters_are_not_printable() {
        let grid = symbols::text_to_grid("ab");
        assert!(grid.contains('\u{200B}'));
        assert_eq!(infer_direction(&grid), Direction::Decode);
        assert_eq!(infer_direction("\u{FEFF}abc"), Direction::Decode);
        assert_eq!(infer_direction("a\u{200D}b"), Direction::Decode);
    }

    #[test]
    fn test_custom_base_parsing() {
        assert_eq!(custom_base(Some("16")).unwrap(), 16);
        assert!(custom_base(Some("sixteen")).is_err());
        assert_eq!(
            custom_base(Some("-2")).unwrap_err().kind(),
            crate::error::ErrorKind::RangeError
        );
    }

    #[test]
    fn test_checkers() {
        let prime = run(
            Operation::Check(Checker::Prime),
            NormalizedRequest::new("P. Checker", "97"),
        )
        .unwrap();
        assert_eq!(prime, Value::Text("True".into()));

        let divisors = run(
            Operation::Check(Checker::Divisors),
            NormalizedRequest::new("Divisors Finder", "-12"),
        )
        .unwrap();
        assert_eq!(
            divisors.as_sequence().unwrap(),
            ["1", "2", "3", "4", "6", "12"]
        );

        let zero = run(
            Operation::Check(Checker::Divisors),
            NormalizedRequest::new("Divisors Finder", "0"),
        )
        .unwrap();
        assert_eq!(zero.as_text(), Some("All integers except 0"));

        let factors = run(
            Operation::Check(Checker::Factors),
            NormalizedRequest::new("Factors Finder", "360"),
        )
        .unwrap();
        assert_eq!(
            factors.as_sequence().unwrap(),
            ["2", "2", "2", "3", "3", "5"]
        );
    }

    #[test]
    fn test_extract_display_limit() {
        let text = (1..=25).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let value = run(
            Operation::Analyze(Analyzer::ExtractNumbers),
            NormalizedRequest::new("Extract Num", &text),
        )
        .unwrap();
        assert!(value.as_text().unwrap().starts_with("Extracted 25 numbers. First 20: [1, 2"));
    }

    #[test]
    fn test_special_properties_report() {
        let value = run(
            Operation::Analyze(Analyzer::SpecialProperties),
            NormalizedRequest::new("Special Properties", "28 and more"),
        )
        .unwrap();
        let report = value.as_report().unwrap();
        assert_eq!(report.get("Is Perfect"), Some("True"));
        assert_eq!(report.get("Is Triangular"), Some("True"));
        assert_eq!(report.get("Proper Divisors"), Some("[1, 2, 4, 7, 14]"));

        let float_first = run(
            Operation::Analyze(Analyzer::SpecialProperties),
            NormalizedRequest::new("Special Properties", "2.5 then 3"),
        );
        assert!(float_first.is_err());
    }

    #[test]
    fn test_basic_statistics_report() {
        let value = run(
            Operation::Analyze(Analyzer::BasicStatistics),
            NormalizedRequest::new("Basic Statistics", "1 2 2 3"),
        )
        .unwrap();
        let report = value.as_report().unwrap();
        assert_eq!(report.get("Count"), Some("4"));
        assert_eq!(report.get("Mean"), Some("2.0000"));
        assert_eq!(report.get("Median"), Some("2.0"));
        assert_eq!(report.get("Mode(s)"), Some("2"));
        assert_eq!(report.get("Variance"), Some("0.5000"));
    }

    #[test]
    fn test_unit_conversion_output() {
        let value = run(
            Operation::Units(crate::features::UnitCategory::Length),
            NormalizedRequest::new("Length", "2")
                .with_mode("km")
                .with_mode2("m"),
        )
        .unwrap();
        assert_eq!(value.as_text(), Some("2000.0"));
    }
}
