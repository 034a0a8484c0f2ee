//! Property tests for the codec round trips and the statistical measures.

use alterm::ByteBase;
use alterm::analysis::{index_of_coincidence, shannon_entropy};
use alterm::ciphers::{AffineKey, affine, caesar, vigenere};
use alterm::features::crack_caesar;
use proptest::prelude::*;

const ENGLISH: &str = "It is a truth universally acknowledged, that a single man in \
    possession of a good fortune, must be in want of a wife. However little known the \
    feelings or views of such a man may be on his first entering a neighbourhood, this \
    truth is so well fixed in the minds of the surrounding families.";

proptest! {
    #[test]
    fn byte_bases_round_trip(text in any::<String>()) {
        for base in ByteBase::ALL {
            let encoded = base.encode_text(&text);
            prop_assert_eq!(base.decode_text(&encoded).unwrap(), text.clone(), "{:?}", base);
        }
    }

    #[test]
    fn entropy_is_non_negative(text in any::<String>()) {
        prop_assert!(shannon_entropy(&text) >= 0.0);
    }

    #[test]
    fn index_of_coincidence_is_a_probability(text in "[A-Za-z ]{0,200}") {
        let ic = index_of_coincidence(&text);
        prop_assert!((0.0..=1.0).contains(&ic));
    }

    #[test]
    fn caesar_round_trip(
        text in any::<String>(),
        shift in prop_oneof![Just(i64::MAX), Just(i64::MIN), any::<i64>()],
    ) {
        prop_assert_eq!(caesar::decrypt(&caesar::encrypt(&text, shift), shift), text);
    }

    #[test]
    fn vigenere_round_trip(text in any::<String>(), key in "[A-Za-z]{1,12}") {
        let encrypted = vigenere::encrypt(&text, &key).unwrap();
        prop_assert_eq!(vigenere::decrypt(&encrypted, &key).unwrap(), text);
    }

    #[test]
    fn affine_round_trip(
        text in "[ -~]{0,100}",
        a in prop_oneof![Just(i64::MAX), Just(i64::MIN + 1), any::<i64>()]
            .prop_filter("coprime with 26", |a| a.rem_euclid(2) == 1 && a.rem_euclid(13) != 0),
        b in prop_oneof![Just(i64::MAX), Just(i64::MIN), any::<i64>()],
    ) {
        let key = AffineKey::new(a, b).unwrap();
        prop_assert_eq!(affine::decrypt(&affine::encrypt(&text, key), key), text);
    }

    #[test]
    fn caesar_crack_recovers_shift(shift in 0i64..26) {
        let crack = crack_caesar(&caesar::encrypt(ENGLISH, shift)).unwrap();
        prop_assert_eq!(crack.shift as i64, shift);
        prop_assert_eq!(crack.plaintext, ENGLISH);
    }
}

#[test]
fn test_single_letter_ic_is_one() {
    assert_eq!(index_of_coincidence("AAAAAAAAAA"), 1.0);
}

#[test]
fn test_uniform_alphabet_ic() {
    let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(40);
    let ic = index_of_coincidence(&text);
    assert!((ic - 0.0385).abs() < 0.01, "ic = {}", ic);
}

#[test]
fn test_entropy_grows_with_diversity() {
    assert_eq!(shannon_entropy(""), 0.0);
    let samples = ["aaaaaaaa", "aaaabbbb", "aabbccdd", "abcdefgh"];
    let values: Vec<f64> = samples.iter().map(|s| shannon_entropy(s)).collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]), "{:?}", values);
}
