//! Error types for document conversion.
//!
//! Every fallible operation of this crate returns [`ConversionError`].
//! Document-level errors carry an [`ErrorCode`], the slash-separated path of
//! the offending element and, when known, its byte range in the source.

mod conversion_error;
mod error_code;

pub use conversion_error::{ConversionError, Result};
pub use error_code::ErrorCode;
