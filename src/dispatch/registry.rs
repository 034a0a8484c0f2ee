use super::handlers;
use super::normalize::NormalizedRequest;
use super::operation::{CUSTOM_RADIX_IDS, Direction, Family, OPERATIONS, Operation};
use super::result::{AnalysisResult, Value};
use crate::core::config::Settings;
use crate::encoders::ByteBase;
use crate::error::{DispatchError, Result, ToolkitError, find_closest_operation};
use crate::features::UnitCategory;
use regex::Regex;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

fn exact_ids() -> &'static HashMap<&'static str, Operation> {
    static TABLE: OnceLock<HashMap<&'static str, Operation>> = OnceLock::new();
    TABLE.get_or_init(|| OPERATIONS.iter().copied().collect())
}

fn base_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| match Regex::new(r"(?i)^Base\s*(\d+|URL)$") {
        Ok(re) => re,
        Err(e) => unreachable!("base pattern does not compile: {}", e),
    })
}

/// Every id that resolves to an operation, grouped by family in listing order.
pub fn catalog() -> Vec<(Family, Vec<String>)> {
    let mut groups: Vec<(Family, Vec<String>)> =
        Family::ALL.iter().map(|f| (*f, Vec::new())).collect();
    let mut push = |family: Family, id: &str| {
        if let Some((_, ids)) = groups.iter_mut().find(|(f, _)| *f == family) {
            ids.push(id.to_string());
        }
    };

    for (id, operation) in OPERATIONS {
        push(operation.family(), *id);
    }
    for (id, _) in CUSTOM_RADIX_IDS {
        push(Family::CustomRadix, id);
    }
    for base in ByteBase::ALL {
        push(Family::ByteEncodings, base.id());
    }
    for category in UnitCategory::ALL {
        push(Family::Units, category.name());
    }
    groups
}

/// Flat list of every resolvable id.
pub fn operation_ids() -> Vec<String> {
    catalog().into_iter().flat_map(|(_, ids)| ids).collect()
}

fn unknown_operation(id: &str) -> ToolkitError {
    let ids = operation_ids();
    let mut message = format!("Conversion not supported: {}", id);
    if let Some(suggestion) = find_closest_operation(id, ids.iter().map(String::as_str)) {
        message.push_str(&format!(". Did you mean '{}'?", suggestion));
    }
    ToolkitError::unsupported(message)
}

/// Maps a request's operation id to an [`Operation`].
///
/// Exact ids are tried first, then custom radix (id containing "Custom"),
/// unit categories, and finally the `Base<N>` / `BaseURL` pattern.
pub fn resolve(request: &NormalizedRequest) -> Result<Operation> {
    let id = request.operation();

    if let Some(operation) = exact_ids().get(id) {
        return Ok(*operation);
    }

    if id.contains("Custom") {
        return CUSTOM_RADIX_IDS
            .iter()
            .find(|(name, _)| id.contains(name))
            .map(|(_, direction)| Operation::CustomRadix(*direction))
            .ok_or_else(|| unknown_operation(id));
    }

    if let Some(category) = UnitCategory::from_name(id) {
        return Ok(Operation::Units(category));
    }

    if let Some(suffix) = base_pattern()
        .captures(id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
    {
        let number = if suffix == "URL" {
            -1
        } else {
            suffix
                .parse::<i32>()
                .map_err(|_| ToolkitError::unsupported(format!("Unsupported base: Base{}", suffix)))?
        };
        let base = ByteBase::from_number(number)?;
        let direction = request.mode().and_then(Direction::from_mode);
        return Ok(Operation::ByteEncoding(base, direction));
    }

    Err(unknown_operation(id))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "operation panicked".to_string()
    }
}

/// Routes normalized requests to their handlers.
///
/// Holds only read-only settings, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    settings: Settings,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs one request. Failures, including handler panics, come back as
    /// [`AnalysisResult::Error`] tagged with the operation id.
    pub fn dispatch(&self, request: &NormalizedRequest) -> AnalysisResult {
        let id = request.operation();
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(request))) {
            Ok(Ok(value)) => AnalysisResult::Success(value),
            Ok(Err(e)) => {
                tracing::debug!(operation = id, kind = e.kind().as_str(), "operation failed");
                AnalysisResult::Error(DispatchError::new(id, e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(operation = id, %message, "operation panicked");
                AnalysisResult::Error(DispatchError::new(id, ToolkitError::invalid(message)))
            }
        }
    }

    fn run(&self, request: &NormalizedRequest) -> Result<Value> {
        let operation = resolve(request)?;
        operation.shape().check(request)?;
        tracing::debug!(operation = request.operation(), ?operation, "dispatching");
        handlers::execute(operation, request, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::ByteBase;
    use crate::error::ErrorKind;

    fn resolve_id(id: &str) -> Result<Operation> {
        resolve(&NormalizedRequest::new(id, "x"))
    }

    #[test]
    fn test_pattern_fallbacks() {
        assert_eq!(
            resolve_id("Decimal to Custom").unwrap(),
            Operation::CustomRadix(Direction::Encode)
        );
        assert_eq!(
            resolve_id("Temperature").unwrap(),
            Operation::Units(UnitCategory::Temperature)
        );
        assert_eq!(
            resolve_id("base 64").unwrap(),
            Operation::ByteEncoding(ByteBase::Base64, None)
        );
        assert_eq!(
            resolve_id("BaseURL").unwrap(),
            Operation::ByteEncoding(ByteBase::Base64Url, None)
        );
    }

    #[test]
    fn test_explicit_base_direction() {
        let request = NormalizedRequest::new("Base32", "x").with_mode("Decode");
        assert_eq!(
            resolve(&request).unwrap(),
            Operation::ByteEncoding(ByteBase::Base32, Some(Direction::Decode))
        );
    }

    #[test]
    fn test_unsupported_base_is_named() {
        let err = resolve_id("Base7").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.message().contains('7'));
    }

    #[test]
    fn test_unknown_operation_suggests() {
        let err = resolve_id("Caesar Craker").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.message().contains("Did you mean 'Caesar Cracker'?"));

        let err = resolve_id("Custom Thing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    }

    #[test]
    fn test_catalog_covers_every_family() {
        let catalog = catalog();
        assert!(catalog.iter().all(|(_, ids)| !ids.is_empty()));
        for id in operation_ids() {
            assert!(resolve_id(&id).is_ok(), "{} does not resolve", id);
        }
    }

    #[test]
    fn test_dispatch_tags_errors_with_operation() {
        let dispatcher = Dispatcher::default();
        let result = dispatcher.dispatch(&NormalizedRequest::new("Num to Roman", "4000"));
        match result {
            AnalysisResult::Error(e) => {
                assert_eq!(e.operation, "Num to Roman");
                assert_eq!(e.kind(), ErrorKind::RangeError);
            }
            AnalysisResult::Success(v) => panic!("expected error, got {:?}", v),
        }
    }

    #[test]
    fn test_unit_category_needs_both_modes() {
        let dispatcher = Dispatcher::default();
        let result = dispatcher.dispatch(&NormalizedRequest::new("Length", "5").with_mode("km"));
        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "operation panicked");
    }
}
