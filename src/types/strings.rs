//! Character and string flavor checks
//!
//! Rust strings are valid UTF-8, so surrogate-pair correctness is
//! guaranteed by the representation; the checks here are about control
//! characters and line separators.

use serde_json::Value;

use crate::diag::ErrorCode;

/// String flavors sharing one check with different character rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFlavor {
    /// Rejects every code point below U+0020.
    Plain,
    /// Like `Plain` but permits `\t`, `\n`, `\r`.
    Text,
    /// Like `Plain`, additionally rejects U+2028 and U+2029.
    TextLine,
}

/// Checks one string flavor. Emptiness is handled by the caller (the
/// `$empty` directive), so `s` is non-empty here.
pub(crate) fn check_text(value: &Value, flavor: TextFlavor) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    let ok = match flavor {
        TextFlavor::Plain => s.chars().all(|c| c >= '\u{20}'),
        TextFlavor::Text => s
            .chars()
            .all(|c| c >= '\u{20}' || c == '\t' || c == '\n' || c == '\r'),
        TextFlavor::TextLine => s
            .chars()
            .all(|c| c >= '\u{20}' && c != '\u{2028}' && c != '\u{2029}'),
    };
    if ok {
        Ok(())
    } else {
        Err(ErrorCode::PatternMismatch)
    }
}

/// Checks a single Unicode code point. `$allowed` given as a string
/// enumerates the permitted characters.
pub(crate) fn check_char(value: &Value, allowed: Option<&str>) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    let mut chars = s.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(ErrorCode::LengthConstraint),
    };
    if let Some(set) = allowed {
        if !set.contains(c) {
            return Err(ErrorCode::InvalidValue);
        }
    }
    Ok(())
}
