//! Program compilation
//!
//! Folds a normalized schema, the option flags, and the caller's role
//! set into a tree of ready-to-run checks. Access expressions are
//! resolved here — `inherit` is rewritten against the nearest
//! ancestor's `$w` (falling back to `*`) — so the executor only sees
//! per-field booleans.

use std::sync::Arc;

use serde_json::Value;

use crate::diag::ErrorCode;
use crate::expr::Ast;
use crate::schema::{
    AccessExpr, AccessOp, AccessTerm, NodeBody, Predicate, Schema, SchemaNode,
};
use crate::types::ScalarType;

use super::{Options, Roles};

/// A compiled validation routine for one (schema, options, access)
/// triple.
#[derive(Debug)]
pub struct Program {
    pub(super) root: NodeProg,
    pub(super) accumulate: bool,
}

/// Checks for one node, in execution order.
#[derive(Debug)]
pub(super) struct NodeProg {
    pub nullable: bool,
    /// Code emitted on a null or kind mismatch.
    pub expected: ErrorCode,
    pub empty: bool,
    pub scalar: Option<ScalarType>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_exclusive: Option<f64>,
    pub max_exclusive: Option<f64>,
    pub big_min: Option<String>,
    pub big_max: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub allowed: Option<Vec<Value>>,
    pub exp: Option<Arc<Ast>>,
    pub func: Option<Predicate>,
    pub body: ProgBody,
}

#[derive(Debug)]
pub(super) enum ProgBody {
    Scalar,
    Object {
        fields: Vec<FieldProg>,
        drop_unknown: bool,
        delta: bool,
    },
    Map {
        value: Box<NodeProg>,
    },
    Array {
        element: Box<NodeProg>,
    },
}

#[derive(Debug)]
pub(super) struct FieldProg {
    pub name: String,
    pub prog: NodeProg,
    pub optional: bool,
    pub default: Option<Value>,
    pub writable: bool,
}

impl Program {
    /// Compiles the routine. Never fails: every definition error was
    /// already raised during normalization.
    pub(super) fn compile(schema: &Schema, options: Options, access: Option<&Roles>) -> Self {
        let mut stack: Vec<AccessExpr> = Vec::new();
        if let Some(w) = &schema.root().meta.write {
            stack.push(w.clone());
        }
        let root = compile_node(schema.root(), true, options, access, &mut stack);
        Self {
            root,
            accumulate: options.contains(Options::ACCUMULATE_ERRORS),
        }
    }
}

fn compile_node(
    node: &SchemaNode,
    is_root: bool,
    options: Options,
    access: Option<&Roles>,
    stack: &mut Vec<AccessExpr>,
) -> NodeProg {
    let meta = &node.meta;
    let (scalar, body, expected) = match &node.body {
        NodeBody::Scalar(scalar) => {
            (Some(scalar.clone()), ProgBody::Scalar, expected_code(scalar))
        }
        NodeBody::Object(object) => {
            let extract = if is_root {
                Options::EXTRACT_TOP
            } else {
                Options::EXTRACT_NESTED
            };
            let delta = options.contains(Options::DELTA_MODE) && meta.delta != Some(false);
            let mut fields = Vec::with_capacity(object.fields.len());
            for (name, child) in &object.fields {
                let writable = match access {
                    None => true,
                    Some(roles) => child
                        .meta
                        .write
                        .as_ref()
                        .map_or(true, |expr| satisfied(expr, roles, stack)),
                };
                let pushed = child.meta.write.is_some();
                if let Some(w) = &child.meta.write {
                    stack.push(w.clone());
                }
                let prog = compile_node(child, false, options, access, stack);
                if pushed {
                    stack.pop();
                }
                fields.push(FieldProg {
                    name: name.clone(),
                    prog,
                    optional: child.meta.optional,
                    default: child.meta.default.clone(),
                    writable,
                });
            }
            (
                None,
                ProgBody::Object {
                    fields,
                    drop_unknown: options.contains(extract),
                    delta,
                },
                ErrorCode::ExpectedObject,
            )
        }
        NodeBody::Map { value } => {
            let value = compile_node(value, false, options, access, stack);
            (
                None,
                ProgBody::Map {
                    value: Box::new(value),
                },
                ErrorCode::ExpectedObject,
            )
        }
        NodeBody::Array(array) => {
            let element = compile_node(&array.element, false, options, access, stack);
            (
                None,
                ProgBody::Array {
                    element: Box::new(element),
                },
                ErrorCode::ExpectedArray,
            )
        }
    };

    // `any` observably ignores $allowed.
    let allowed = if matches!(scalar, Some(ScalarType::Any)) {
        None
    } else {
        meta.allowed.clone()
    };

    NodeProg {
        nullable: meta.nullable,
        expected,
        empty: meta.empty,
        scalar,
        min: meta.min,
        max: meta.max,
        min_exclusive: meta.min_exclusive,
        max_exclusive: meta.max_exclusive,
        big_min: meta.big_min.clone(),
        big_max: meta.big_max.clone(),
        min_length: meta.min_length,
        max_length: meta.max_length,
        allowed,
        exp: meta.exp.as_ref().map(|(_, ast)| ast.clone()),
        func: meta.func.clone(),
        body,
    }
}

fn expected_code(scalar: &ScalarType) -> ErrorCode {
    match scalar {
        ScalarType::Any => ErrorCode::InvalidValue,
        ScalarType::Bool => ErrorCode::ExpectedBoolean,
        ScalarType::Int { .. }
        | ScalarType::Uint { .. }
        | ScalarType::Number
        | ScalarType::Numeric { .. }
        | ScalarType::Lat
        | ScalarType::Lon => ErrorCode::ExpectedNumber,
        _ => ErrorCode::ExpectedString,
    }
}

/// Evaluates an access expression against a role set. `inherit`
/// resolves to the nearest ancestor expression still on the stack;
/// with no ancestor it behaves as `*`.
fn satisfied(expr: &AccessExpr, roles: &Roles, ancestors: &[AccessExpr]) -> bool {
    let term_satisfied = |term: &AccessTerm| match term {
        AccessTerm::Star => true,
        AccessTerm::None => false,
        AccessTerm::Role(role) => roles.contains(role),
        AccessTerm::Inherit => match ancestors.split_last() {
            Some((parent, rest)) => satisfied(parent, roles, rest),
            None => true,
        },
    };
    match expr.op {
        AccessOp::Or => expr.terms.iter().any(term_satisfied),
        AccessOp::And => expr.terms.iter().all(term_satisfied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Roles {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn expr(src: &str) -> AccessExpr {
        AccessExpr::parse(src).unwrap()
    }

    #[test]
    fn test_union_and_intersection() {
        let r = roles(&["user"]);
        assert!(satisfied(&expr("user|admin"), &r, &[]));
        assert!(!satisfied(&expr("user&admin"), &r, &[]));
        assert!(satisfied(&expr("user&admin"), &roles(&["user", "admin"]), &[]));
    }

    #[test]
    fn test_star_and_none() {
        let r = roles(&[]);
        assert!(satisfied(&expr("*"), &r, &[]));
        assert!(!satisfied(&expr("none"), &r, &[]));
        assert!(satisfied(&expr("none|*"), &r, &[]));
    }

    #[test]
    fn test_inherit_walks_ancestors() {
        let r = roles(&["user"]);
        let root = expr("user|admin");
        assert!(satisfied(&expr("admin|inherit"), &r, &[root.clone()]));
        assert!(!satisfied(&expr("admin|inherit"), &roles(&["guest"]), &[root.clone()]));
        // Chained inherit: middle expression itself inherits.
        let mid = expr("inherit");
        assert!(satisfied(&expr("inherit"), &r, &[root, mid]));
    }

    #[test]
    fn test_inherit_without_ancestor_is_star() {
        assert!(satisfied(&expr("inherit"), &roles(&[]), &[]));
    }
}
