//! Text and number conversion toolkit.
//!
//! Every operation is addressed by a string id (`"Decimal to Binary"`,
//! `"Base64"`, `"Cipher Detection"`, ...) and runs through one
//! [`Dispatcher`], which normalizes the parameters, resolves the id and
//! returns either a [`Value`] or a [`DispatchError`] naming the operation.
//!
//! ```
//! use alterm::invoke;
//!
//! let encoded = invoke("Base64", "hello", None, Some("Encode"), None).unwrap();
//! assert_eq!(encoded.to_string(), "aGVsbG8=");
//! ```

pub mod analysis;
pub mod ciphers;
pub mod core;
pub mod dispatch;
pub mod encoders;
pub mod error;
pub mod features;
pub mod prelude;
pub mod worker;

pub use crate::core::{Alphabet, EncodingMode, OutputFormat, Settings};
pub use dispatch::{
    AnalysisResult, Dispatcher, NormalizedRequest, RawRequest, RenderOptions, Renderer, Report,
    Value, catalog, invoke, normalize, operation_ids,
};
pub use encoders::ByteBase;
pub use error::{DispatchError, ErrorKind, Result, ToolkitError};
pub use features::{HashAlgorithm, UnitCategory};
pub use worker::{Completion, TaskPool};
