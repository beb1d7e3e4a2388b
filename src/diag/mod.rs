//! Diagnostic model for the validation engine
//!
//! Two error classes exist and never mix:
//!
//! 1. [`DefineError`] — schema-compile errors raised eagerly by the
//!    normalizer, before any input is involved.
//! 2. [`SchemaError`] — the runtime carrier thrown by `process`, holding
//!    one or more [`Diagnostic`] records with a code and a field path.

mod errors;
mod path;

pub use errors::{Accumulator, DefineError, Diagnostic, ErrorCode, SchemaError};
pub use path::{Path, Seg};
