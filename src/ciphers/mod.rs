//! Classical ciphers. All of them leave characters outside their alphabet alone.

pub mod affine;
pub mod caesar;
pub mod symbols;
pub mod vigenere;

pub use affine::AffineKey;
