//! Error codes, diagnostics, and the two error carriers

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::path::Path;

/// Closed vocabulary of validation diagnostic codes.
///
/// `Custom` carries a code supplied by an external `$fn` predicate; the
/// engine itself only ever emits the named variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    ExpectedBoolean,
    ExpectedNumber,
    ExpectedString,
    ExpectedObject,
    ExpectedArray,
    InvalidValue,
    OutOfRange,
    LengthConstraint,
    UnexpectedProperty,
    MissingProperty,
    NoAccess,
    InvalidFormat,
    PatternMismatch,
    /// Predicate-supplied code.
    Custom(String),
}

impl ErrorCode {
    /// Returns the code string.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ExpectedBoolean => "ExpectedBoolean",
            ErrorCode::ExpectedNumber => "ExpectedNumber",
            ErrorCode::ExpectedString => "ExpectedString",
            ErrorCode::ExpectedObject => "ExpectedObject",
            ErrorCode::ExpectedArray => "ExpectedArray",
            ErrorCode::InvalidValue => "InvalidValue",
            ErrorCode::OutOfRange => "OutOfRange",
            ErrorCode::LengthConstraint => "LengthConstraint",
            ErrorCode::UnexpectedProperty => "UnexpectedProperty",
            ErrorCode::MissingProperty => "MissingProperty",
            ErrorCode::NoAccess => "NoAccess",
            ErrorCode::InvalidFormat => "InvalidFormat",
            ErrorCode::PatternMismatch => "PatternMismatch",
            ErrorCode::Custom(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validation failure: a code and the path it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Failure code from the closed vocabulary.
    pub code: ErrorCode,
    /// Rendered field path (`a.b[2].c`); empty at the input root.
    pub path: String,
}

impl Diagnostic {
    /// Creates a diagnostic at the given path.
    pub fn new(code: ErrorCode, path: &Path) -> Self {
        Self {
            code,
            path: path.render(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} at '{}'", self.code, self.path)
        }
    }
}

/// The carrier thrown by `process` on validation failure.
///
/// Holds every collected diagnostic in depth-first declaration order.
/// In fail-fast mode there is exactly one; in accumulation mode there
/// may be many.
#[derive(Debug, Clone)]
pub struct SchemaError {
    errors: Vec<Diagnostic>,
}

impl SchemaError {
    /// Wraps collected diagnostics. At least one must be present.
    pub fn new(errors: Vec<Diagnostic>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// Creates a single-diagnostic error.
    pub fn single(code: ErrorCode, path: &Path) -> Self {
        Self {
            errors: vec![Diagnostic::new(code, path)],
        }
    }

    /// The collected diagnostics, in declaration order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// The first diagnostic.
    pub fn first(&self) -> &Diagnostic {
        &self.errors[0]
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema validation failed: ")?;
        for (i, d) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Collects diagnostics during one traversal.
///
/// In fail-fast mode the first report aborts the walk; in accumulation
/// mode reports append and the walk continues, throwing once at the end.
#[derive(Debug)]
pub struct Accumulator {
    accumulate: bool,
    errors: Vec<Diagnostic>,
}

impl Accumulator {
    /// Creates an accumulator; `accumulate` selects accumulation mode.
    pub fn new(accumulate: bool) -> Self {
        Self {
            accumulate,
            errors: Vec::new(),
        }
    }

    /// Records a failure. Returns `Err` when the traversal must stop
    /// immediately (fail-fast mode).
    pub fn report(&mut self, code: ErrorCode, path: &Path) -> Result<(), SchemaError> {
        self.errors.push(Diagnostic::new(code, path));
        if self.accumulate {
            Ok(())
        } else {
            Err(SchemaError::new(std::mem::take(&mut self.errors)))
        }
    }

    /// True when any diagnostic was collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finishes the traversal: `Err` when anything was collected.
    pub fn finish(self) -> Result<(), SchemaError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(self.errors))
        }
    }
}

/// Schema-compile errors: programmer mistakes raised eagerly by the
/// normalizer and the enum factory, before any input is involved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefineError {
    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("unknown directive '{directive}' for type '{type_name}'")]
    UnknownDirective { directive: String, type_name: String },

    #[error("invalid $type shorthand '{shorthand}': {reason}")]
    BadShorthand { shorthand: String, reason: String },

    #[error("invalid directive value for '{directive}': {reason}")]
    BadDirective { directive: String, reason: String },

    #[error("invalid expression '{expression}': {reason}")]
    BadExpression { expression: String, reason: String },

    #[error("invalid access expression '{expression}': {reason}")]
    BadAccess { expression: String, reason: String },

    #[error("duplicate field '{0}' in $include")]
    IncludeCollision(String),

    #[error("invalid descriptor: {0}")]
    BadDescriptor(String),

    #[error("numeric precision/scale out of order: precision {precision}, scale {scale}")]
    BadPrecision { precision: u32, scale: u32 },

    #[error("unknown predicate '{0}' in $fn")]
    UnknownPredicate(String),

    #[error("enum key '{0}' is reserved")]
    ReservedEnumKey(String),

    #[error("enum value for '{key}' is not an integer")]
    NonIntegerEnumValue { key: String },

    #[error("default value for type '{type_name}' does not satisfy the field schema: {detail}")]
    BadDefault { type_name: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings() {
        assert_eq!(ErrorCode::ExpectedBoolean.as_str(), "ExpectedBoolean");
        assert_eq!(ErrorCode::NoAccess.as_str(), "NoAccess");
        assert_eq!(ErrorCode::Custom("TooShiny".into()).as_str(), "TooShiny");
    }

    #[test]
    fn test_fail_fast_aborts_on_first_report() {
        let mut acc = Accumulator::new(false);
        let mut path = Path::root();
        path.push_field("a");
        let err = acc.report(ErrorCode::ExpectedNumber, &path).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.first().path, "a");
    }

    #[test]
    fn test_accumulation_collects_in_order() {
        let mut acc = Accumulator::new(true);
        let mut path = Path::root();
        path.push_field("a");
        acc.report(ErrorCode::ExpectedBoolean, &path).unwrap();
        path.pop();
        path.push_field("b");
        acc.report(ErrorCode::ExpectedNumber, &path).unwrap();
        let err = acc.finish().unwrap_err();
        let codes: Vec<_> = err.errors().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["ExpectedBoolean", "ExpectedNumber"]);
    }

    #[test]
    fn test_accumulator_finish_clean() {
        let acc = Accumulator::new(true);
        assert!(acc.finish().is_ok());
    }

    #[test]
    fn test_diagnostic_serializes() {
        let mut path = Path::root();
        path.push_field("x");
        let d = Diagnostic::new(ErrorCode::OutOfRange, &path);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["path"], "x");
    }

    #[test]
    fn test_define_error_display() {
        let e = DefineError::UnknownType("in".into());
        assert!(e.to_string().contains("unknown type"));
    }
}
