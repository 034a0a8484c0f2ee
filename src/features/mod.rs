pub mod detection;
pub mod generators;
pub mod hashing;
pub mod units;

pub use detection::{CaesarCrack, CipherClassification, Conclusion, EncodingGuess, classify, crack_caesar};
pub use generators::{Generated, GeneratorKind};
pub use hashing::{HashAlgorithm, hash, hash_text};
pub use units::UnitCategory;
