//! trellis - a strict, deterministic schema definition and validation
//! engine for structured data
//!
//! A declarative schema (a tree of type descriptors with constraint
//! directives) is normalized once, compiled into a specialized
//! validation routine per (schema, options, access) triple, and run
//! over inputs to produce normalized outputs and typed diagnostics.
//!
//! # Design Principles
//!
//! - Schemas are immutable after normalization
//! - Validation is deterministic and single-pass
//! - Inputs are never mutated; outputs are freshly built
//! - Definition mistakes fail at schema-compile time, never at
//!   validation time
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use trellis::{process, schema, Options};
//!
//! let user = schema(&json!({
//!     "name": { "$type": "string" },
//!     "age": { "$type": "int8", "$min": 0 },
//!     "tags": { "$type": "string[]", "$optional": true },
//! }))
//! .unwrap();
//!
//! let output = process(
//!     &json!({ "name": "Alice", "age": 30 }),
//!     &user,
//!     Options::NONE,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(output["name"], json!("Alice"));
//! ```

pub mod diag;
pub mod engine;
pub mod enums;
pub mod expr;
pub mod misc;
pub mod schema;
pub mod types;

pub use diag::{DefineError, Diagnostic, ErrorCode, SchemaError};
pub use engine::{fingerprint, precompile, process, Mode, Options, Roles};
pub use enums::Enum;
pub use schema::{FnTable, Schema, Verdict};

use serde_json::Value;

/// Normalizes a descriptor into an immutable [`Schema`].
///
/// Already-normalized schemas need no second pass: a [`Schema`] value
/// is its own normal form and clones cheaply.
pub fn schema(descriptor: &Value) -> Result<Schema, DefineError> {
    Schema::from_value(descriptor)
}

/// Normalizes a descriptor, resolving `$fn` directives against the
/// given table of named predicates.
pub fn schema_with(descriptor: &Value, fns: &FnTable) -> Result<Schema, DefineError> {
    Schema::from_value_with(descriptor, fns)
}
