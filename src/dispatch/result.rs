//! Uniform operation results and their text or JSON rendering.

use crate::core::config::{OutputFormat, RenderSettings};
use crate::error::{DispatchError, ErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// A titled block of key/value lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.entries.push(Entry {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

/// Ordered sections produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First value stored under `key` in any section.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections.iter().find_map(|s| s.get(key))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "=== {} ===", section.title)?;
            for entry in &section.entries {
                write!(f, "\n{}: {}", entry.key, entry.value)?;
            }
        }
        Ok(())
    }
}

/// The payload of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Sequence(Vec<String>),
    Mapping(Report),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_report(&self) -> Option<&Report> {
        match self {
            Value::Mapping(report) => Some(report),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Sequence(items) => f.write_str(&items.join("\n")),
            Value::Mapping(report) => fmt::Display::fmt(report, f),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Report> for Value {
    fn from(report: Report) -> Self {
        Value::Mapping(report)
    }
}

/// Outcome of one dispatch; errors never escape as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Success(Value),
    Error(DispatchError),
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Error(e) => Some(e.kind()),
        }
    }

    pub fn into_result(self) -> Result<Value, DispatchError> {
        match self {
            AnalysisResult::Success(value) => Ok(value),
            AnalysisResult::Error(e) => Err(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            format: settings.format,
        }
    }
}

/// Formats results without knowing which analyzer produced them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render_value(&self, value: &Value) -> Result<String, serde_json::Error> {
        match self.options.format {
            OutputFormat::Text => Ok(value.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(value),
        }
    }

    pub fn render(&self, result: &AnalysisResult) -> Result<String, serde_json::Error> {
        match result {
            AnalysisResult::Success(value) => self.render_value(value),
            AnalysisResult::Error(e) => match self.options.format {
                OutputFormat::Text => Ok(e.to_string()),
                OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                    "error": {
                        "operation": e.operation,
                        "kind": e.kind(),
                        "message": e.source.message(),
                    }
                })),
            },
        }
    }
}
