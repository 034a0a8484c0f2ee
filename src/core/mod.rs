pub mod alphabet;
pub mod config;

pub use alphabet::{Alphabet, EncodingMode};
pub use config::{OutputFormat, Settings};
