//! Turns loosely-typed call parameters into a [`NormalizedRequest`].

use crate::error::{Result, ToolkitError};

/// Anything that can report its current text, such as an input widget.
pub trait TextSource {
    fn current_text(&self) -> String;
}

impl TextSource for String {
    fn current_text(&self) -> String {
        self.clone()
    }
}

/// One raw parameter as handed over by a caller.
#[derive(Clone, Copy, Default)]
pub enum RawValue<'a> {
    #[default]
    Absent,
    Text(&'a str),
    /// Decoded as UTF-8, invalid sequences replaced
    Bytes(&'a [u8]),
    Source(&'a dyn TextSource),
}

impl RawValue<'_> {
    fn resolve(self) -> Option<String> {
        match self {
            RawValue::Absent => None,
            RawValue::Text(s) => Some(s.to_string()),
            RawValue::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            RawValue::Source(source) => Some(source.current_text()),
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(s: &'a str) -> Self {
        RawValue::Text(s)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(s: &'a String) -> Self {
        RawValue::Text(s)
    }
}

impl<'a> From<&'a [u8]> for RawValue<'a> {
    fn from(b: &'a [u8]) -> Self {
        RawValue::Bytes(b)
    }
}

impl<'a> From<Option<&'a str>> for RawValue<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(RawValue::Absent, RawValue::Text)
    }
}

/// Parameters exactly as received, before any cleanup.
#[derive(Clone, Copy, Default)]
pub struct RawRequest<'a> {
    pub operation: Option<&'a str>,
    pub text: RawValue<'a>,
    pub base: RawValue<'a>,
    pub mode: RawValue<'a>,
    pub mode2: RawValue<'a>,
}

impl<'a> RawRequest<'a> {
    pub fn new(operation: &'a str, text: impl Into<RawValue<'a>>) -> Self {
        Self {
            operation: Some(operation),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn base(mut self, base: impl Into<RawValue<'a>>) -> Self {
        self.base = base.into();
        self
    }

    pub fn mode(mut self, mode: impl Into<RawValue<'a>>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn mode2(mut self, mode2: impl Into<RawValue<'a>>) -> Self {
        self.mode2 = mode2.into();
        self
    }
}

/// A cleaned-up call: every field trimmed, blank auxiliaries dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    operation: String,
    text: String,
    base: Option<String>,
    mode: Option<String>,
    mode2: Option<String>,
}

fn auxiliary(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NormalizedRequest {
    pub fn new(operation: &str, text: &str) -> Self {
        Self {
            operation: operation.trim().to_string(),
            text: text.trim().to_string(),
            base: None,
            mode: None,
            mode2: None,
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = auxiliary(Some(base.to_string()));
        self
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = auxiliary(Some(mode.to_string()));
        self
    }

    pub fn with_mode2(mut self, mode2: &str) -> Self {
        self.mode2 = auxiliary(Some(mode2.to_string()));
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn mode2(&self) -> Option<&str> {
        self.mode2.as_deref()
    }
}

/// Cleans up a raw request.
///
/// Missing text becomes the empty string and blank auxiliaries count as
/// absent.
///
/// # Errors
///
/// `InvalidInput` only when the operation id is missing or blank.
pub fn normalize(raw: RawRequest<'_>) -> Result<NormalizedRequest> {
    let operation = raw
        .operation
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .ok_or_else(|| ToolkitError::invalid("An operation id is required"))?;

    Ok(NormalizedRequest {
        operation: operation.to_string(),
        text: raw.text.resolve().unwrap_or_default().trim().to_string(),
        base: auxiliary(raw.base.resolve()),
        mode: auxiliary(raw.mode.resolve()),
        mode2: auxiliary(raw.mode2.resolve()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Combo(&'static str);

    impl TextSource for Combo {
        fn current_text(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_trims_and_collapses_blanks() {
        let request = normalize(
            RawRequest::new(" Base64 ", "  hello \n")
                .base("   ")
                .mode(" Encode "),
        )
        .unwrap();

        assert_eq!(request.operation(), "Base64");
        assert_eq!(request.text(), "hello");
        assert_eq!(request.base(), None);
        assert_eq!(request.mode(), Some("Encode"));
        assert_eq!(request.mode2(), None);
    }

    #[test]
    fn test_bytes_are_decoded_lossily() {
        let bytes: &[u8] = &[b'h', b'i', 0xFF];
        let request = normalize(RawRequest::new("Characters", bytes)).unwrap();
        assert_eq!(request.text(), "hi\u{FFFD}");
    }

    #[test]
    fn test_text_sources() {
        let unit = Combo(" km ");
        let target = String::from("mile");
        let request = normalize(
            RawRequest::new("Length", "5")
                .mode(RawValue::Source(&unit))
                .mode2(RawValue::Source(&target)),
        )
        .unwrap();

        assert_eq!(request.mode(), Some("km"));
        assert_eq!(request.mode2(), Some("mile"));
    }

    #[test]
    fn test_missing_text_is_empty() {
        let request = normalize(RawRequest {
            operation: Some("Entropy"),
            ..RawRequest::default()
        })
        .unwrap();
        assert_eq!(request.text(), "");
    }

    #[test]
    fn test_missing_operation_fails() {
        assert!(normalize(RawRequest::default()).is_err());
        assert!(normalize(RawRequest::new("  ", "x")).is_err());
    }
}
