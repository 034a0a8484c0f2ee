//! The uniform invocation surface: normalize, resolve, run, report.

mod handlers;
pub mod normalize;
pub mod operation;
pub mod registry;
pub mod result;

pub use normalize::{NormalizedRequest, RawRequest, RawValue, TextSource, normalize};
pub use operation::{Direction, Family, Operation, ParameterShape};
pub use registry::{Dispatcher, catalog, operation_ids, resolve};
pub use result::{AnalysisResult, RenderOptions, Renderer, Report, Section, Value};

use crate::error::DispatchError;
use std::sync::OnceLock;

fn default_dispatcher() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::default)
}

/// Runs one operation with default settings.
///
/// # Example
///
/// ```
/// let binary = alterm::invoke("Decimal to Binary", "10", None, None, None).unwrap();
/// assert_eq!(binary.to_string(), "1010");
/// ```
pub fn invoke(
    operation: &str,
    text: &str,
    base: Option<&str>,
    mode: Option<&str>,
    mode2: Option<&str>,
) -> Result<Value, DispatchError> {
    let request = normalize(
        RawRequest::new(operation, text)
            .base(base)
            .mode(mode)
            .mode2(mode2),
    )
    .map_err(|e| DispatchError::new(operation, e))?;
    default_dispatcher().dispatch(&request).into_result()
}
