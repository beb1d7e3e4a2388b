//! Access expressions (`$r`, `$w`, `$a`)
//!
//! Grammar: `token ('|' token)*` or `token ('&' token)*`. Mixing `|`
//! and `&` in one expression is a definition error; parentheses are
//! not supported. Tokens are role identifiers plus `*` (any role),
//! `none` (the empty set), and `inherit` (the nearest ancestor's
//! expression).

use crate::diag::DefineError;
use crate::misc::is_variable_name;

/// Combinator of an access expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    /// Union: any satisfied term satisfies the expression.
    Or,
    /// Intersection: every term must be satisfied.
    And,
}

/// One term of an access expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTerm {
    /// `*`: satisfied by any role set.
    Star,
    /// `none`: never satisfied.
    None,
    /// `inherit`: the nearest ancestor's expression.
    Inherit,
    /// A role name.
    Role(String),
}

/// A parsed access expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessExpr {
    pub op: AccessOp,
    pub terms: Vec<AccessTerm>,
    /// Original source text, kept for rendering.
    pub source: String,
}

impl AccessExpr {
    /// Parses an access expression.
    pub fn parse(source: &str) -> Result<Self, DefineError> {
        let bad = |reason: &str| DefineError::BadAccess {
            expression: source.to_string(),
            reason: reason.to_string(),
        };

        let has_or = source.contains('|');
        let has_and = source.contains('&');
        if has_or && has_and {
            return Err(bad("cannot mix '|' and '&'"));
        }
        let (op, sep) = if has_and {
            (AccessOp::And, '&')
        } else {
            (AccessOp::Or, '|')
        };

        let mut terms = Vec::new();
        for raw in source.split(sep) {
            let token = raw.trim();
            let term = match token {
                "" => return Err(bad("empty token")),
                "*" => AccessTerm::Star,
                "none" => AccessTerm::None,
                "inherit" => AccessTerm::Inherit,
                name if is_variable_name(name) => AccessTerm::Role(name.to_string()),
                _ => return Err(bad("token is not an identifier")),
            };
            terms.push(term);
        }
        Ok(Self {
            op,
            terms,
            source: source.to_string(),
        })
    }

    /// True when any term is `inherit`.
    pub fn inherits(&self) -> bool {
        self.terms.contains(&AccessTerm::Inherit)
    }
}
