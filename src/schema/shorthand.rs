//! `$type` shorthand grammar
//!
//! A `$type` string is `base modifier*` where a modifier is `?`
//! (nullable at that level) or `[bound]` (one array dimension). A
//! bound is `n`, `n:`, `:m`, `n:m`, or empty. Dimensions read
//! outer-to-inner: `int[2][3]` is an outer array of length 2 holding
//! inner arrays of length 3. At most one `?` per level.

use crate::diag::DefineError;

/// One array dimension from the shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(super) struct Dim {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub nullable: bool,
}

/// A parsed `$type` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParsedType {
    pub base: String,
    pub base_nullable: bool,
    /// Dimensions in written (outer-to-inner) order.
    pub dims: Vec<Dim>,
}

fn bad(shorthand: &str, reason: impl Into<String>) -> DefineError {
    DefineError::BadShorthand {
        shorthand: shorthand.to_string(),
        reason: reason.into(),
    }
}

/// Parses a `$type` string.
pub(super) fn parse(src: &str) -> Result<ParsedType, DefineError> {
    // The base runs to the first modifier; parentheses (numeric(p,s))
    // are part of the base.
    let mut base_end = src.len();
    let mut depth = 0usize;
    for (i, c) in src.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '?' | '[' if depth == 0 => {
                base_end = i;
                break;
            }
            _ => {}
        }
    }
    let base = &src[..base_end];
    if base.is_empty() {
        return Err(bad(src, "missing base type"));
    }

    let mut parsed = ParsedType {
        base: base.to_string(),
        base_nullable: false,
        dims: Vec::new(),
    };

    let mut rest = &src[base_end..];

    // Optional '?' on the base level.
    if let Some(r) = rest.strip_prefix('?') {
        parsed.base_nullable = true;
        rest = r;
        if rest.starts_with('?') {
            return Err(bad(src, "repeated '?'"));
        }
    }

    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .ok_or_else(|| bad(src, "expected '['"))?;
        let close = inner
            .find(']')
            .ok_or_else(|| bad(src, "missing ']'"))?;
        let bound = &inner[..close];
        let mut dim = parse_bound(src, bound)?;
        rest = &inner[close + 1..];
        if let Some(r) = rest.strip_prefix('?') {
            dim.nullable = true;
            rest = r;
            if rest.starts_with('?') {
                return Err(bad(src, "repeated '?'"));
            }
        }
        parsed.dims.push(dim);
    }

    Ok(parsed)
}

fn parse_bound(src: &str, bound: &str) -> Result<Dim, DefineError> {
    if bound.is_empty() {
        return Ok(Dim::default());
    }
    let parse_num = |text: &str| -> Result<u64, DefineError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad(src, format!("bad bound '{}'", bound)));
        }
        text.parse()
            .map_err(|_| bad(src, format!("bad bound '{}'", bound)))
    };
    match bound.split_once(':') {
        None => {
            let n = parse_num(bound)?;
            Ok(Dim {
                min: Some(n),
                max: Some(n),
                nullable: false,
            })
        }
        Some((lo, hi)) => {
            let min = if lo.is_empty() { None } else { Some(parse_num(lo)?) };
            let max = if hi.is_empty() { None } else { Some(parse_num(hi)?) };
            if min.is_none() && max.is_none() {
                return Err(bad(src, format!("bad bound '{}'", bound)));
            }
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(bad(src, format!("bound '{}' is inverted", bound)));
                }
            }
            Ok(Dim { min, max, nullable: false })
        }
    }
}
