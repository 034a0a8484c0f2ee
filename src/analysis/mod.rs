//! Statistical text analysis and numeric property checks.

pub mod characters;
pub mod frequency;
pub mod numbers;
pub mod properties;

pub use frequency::{FrequencyTable, TextStatistics, analyze, index_of_coincidence, shannon_entropy};
pub use numbers::{Number, NumericSummary, extract_numbers};
