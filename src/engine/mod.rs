//! Validator compiler, executor, and routine cache
//!
//! For every unique (schema fingerprint, option bits, access
//! fingerprint) triple the compiler emits one [`Program`]: a typed-op
//! tree specialized for that combination. The program walks the input
//! once in declaration order, applies constraints inline, and builds a
//! fresh output mirror. Programs live in a process-wide cache and are
//! shared as `Arc`s.

mod cache;
mod program;
mod run;

pub use cache::fingerprint;
pub use program::Program;

use std::collections::BTreeSet;
use std::ops::BitOr;
use std::sync::Arc;

use serde_json::Value;

use crate::diag::SchemaError;
use crate::schema::Schema;

/// Role set held by a caller. Access checks are disabled when absent.
pub type Roles = BTreeSet<String>;

/// Bit-combinable processing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Options(u32);

impl Options {
    /// No options.
    pub const NONE: Options = Options(0);
    /// Unknown fields at the root are silently dropped.
    pub const EXTRACT_TOP: Options = Options(1);
    /// Unknown fields inside nested objects are dropped.
    pub const EXTRACT_NESTED: Options = Options(2);
    /// Both extract modes.
    pub const EXTRACT_ALL: Options = Options(1 | 2);
    /// Partial records admitted; `$delta: false` opts a node out.
    pub const DELTA_MODE: Options = Options(4);
    /// Collect every diagnostic instead of failing fast.
    pub const ACCUMULATE_ERRORS: Options = Options(8);

    /// True when every bit of `other` is set.
    pub fn contains(self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bits, for fingerprinting.
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

/// Compilation target of [`precompile`]. `Process` is the only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Process,
}

/// Validates `input` against `schema`, returning the freshly built
/// output or a [`SchemaError`] with the collected diagnostics. The
/// input is never mutated.
pub fn process(
    input: &Value,
    schema: &Schema,
    options: Options,
    access: Option<&Roles>,
) -> Result<Value, SchemaError> {
    cache::fetch(schema, options, access).run(input)
}

/// Fetches (compiling on a miss) the routine for the given triple.
/// Useful for cache warmup and introspection.
pub fn precompile(
    mode: Mode,
    schema: &Schema,
    options: Options,
    access: Option<&Roles>,
) -> Arc<Program> {
    match mode {
        Mode::Process => cache::fetch(schema, options, access),
    }
}
