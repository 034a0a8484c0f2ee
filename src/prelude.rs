//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use alterm::prelude::*;
//!
//! let dispatcher = Dispatcher::new(Settings::default());
//! let result = dispatcher.dispatch(&NormalizedRequest::new("Num to Roman", "1994"));
//! assert_eq!(result.into_result().unwrap().to_string(), "MCMXCIV");
//! ```

pub use crate::{
    // Dispatch
    AnalysisResult,
    DispatchError,
    Dispatcher,
    ErrorKind,
    NormalizedRequest,
    RawRequest,
    Renderer,
    Report,
    // Config
    Settings,
    // Background execution
    TaskPool,
    ToolkitError,
    Value,
    invoke,
    normalize,
};
