use serde::Serialize;
use thiserror::Error;

/// Failure categories shared by every converter and analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidInput,
    UnsupportedOperation,
    RangeError,
    TimeoutTruncated,
    EmptyInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::UnsupportedOperation => "UnsupportedOperation",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::TimeoutTruncated => "TimeoutTruncated",
            ErrorKind::EmptyInput => "EmptyInput",
        }
    }
}

/// Errors that can occur inside a single operation.
///
/// Every message embeds the offending value so the caller can show it as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    RangeError(String),

    #[error("{0}")]
    TimeoutTruncated(String),

    #[error("{0}")]
    EmptyInput(String),
}

impl ToolkitError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolkitError::InvalidInput(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        ToolkitError::UnsupportedOperation(message.into())
    }

    pub fn range(message: impl Into<String>) -> Self {
        ToolkitError::RangeError(message.into())
    }

    pub fn empty(what: &str) -> Self {
        ToolkitError::EmptyInput(format!("{} cannot be empty", what))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolkitError::InvalidInput(_) => ErrorKind::InvalidInput,
            ToolkitError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            ToolkitError::RangeError(_) => ErrorKind::RangeError,
            ToolkitError::TimeoutTruncated(_) => ErrorKind::TimeoutTruncated,
            ToolkitError::EmptyInput(_) => ErrorKind::EmptyInput,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ToolkitError::InvalidInput(m)
            | ToolkitError::UnsupportedOperation(m)
            | ToolkitError::RangeError(m)
            | ToolkitError::TimeoutTruncated(m)
            | ToolkitError::EmptyInput(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;

/// An operation failure tagged with the id that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error converting ({operation}): {source}")]
pub struct DispatchError {
    pub operation: String,
    #[source]
    pub source: ToolkitError,
}

impl DispatchError {
    pub fn new(operation: impl Into<String>, source: ToolkitError) -> Self {
        Self {
            operation: operation.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the registered operation id closest to a mistyped one.
///
/// Comparison is case-insensitive; ids further than a third of the
/// input length away are not suggested.
pub fn find_closest_operation<'a, I>(name: &str, available: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = name.to_lowercase();
    let threshold = (needle.chars().count() / 3).max(2);

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in available {
        let distance = levenshtein_distance(&needle, &candidate.to_lowercase());
        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(candidate);
        }
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("Base64", "Base64"), 0);
        assert_eq!(levenshtein_distance("Base64", "Base32"), 2);
        assert_eq!(levenshtein_distance("", "MD5"), 3);
    }

    #[test]
    fn test_find_closest_operation() {
        let ops = ["Decimal to Binary", "Binary to Decimal", "Entropy", "MD5"];

        assert_eq!(
            find_closest_operation("decimal to binry", ops),
            Some("Decimal to Binary")
        );
        assert_eq!(find_closest_operation("Entrop", ops), Some("Entropy"));
        assert_eq!(find_closest_operation("UnknownOp", ops), None);
    }

    #[test]
    fn test_kind_round_trip() {
        let err = ToolkitError::range("Number must be between 1 and 3999");
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert_eq!(err.message(), "Number must be between 1 and 3999");
    }

    #[test]
    fn test_dispatch_error_display() {
        let err = DispatchError::new("Binary to Decimal", ToolkitError::invalid("Invalid digit '2'"));
        assert_eq!(
            err.to_string(),
            "Error converting (Binary to Decimal): Invalid digit '2'"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
