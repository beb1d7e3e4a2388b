//! Schema model and normalizer
//!
//! A user-authored descriptor — a tree of JSON mappings and shorthand
//! `$type` strings — is normalized into an immutable [`Schema`]. The
//! normalized form is a tagged tree with every type resolved against
//! the registry, every shorthand expanded, `$extend`/`$include`
//! applied, and object-level metadata derived.
//!
//! Schemas are immutable after normalization and cheap to clone; the
//! handle is an `Arc`.

mod access;
mod derive;
mod node;
mod normalize;
mod render;
mod shorthand;

pub use access::{AccessExpr, AccessOp, AccessTerm};
pub use node::{
    ArrayBody, Directives, FnTable, GroupTag, NodeBody, ObjectBody, Predicate, SchemaNode,
    UniqueSpec, Verdict,
};

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::diag::DefineError;

/// An immutable, fully normalized schema.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Arc<SchemaNode>,
}

impl Schema {
    /// Normalizes a descriptor into a schema.
    pub fn from_value(descriptor: &Value) -> Result<Self, DefineError> {
        Self::from_value_with(descriptor, &FnTable::new())
    }

    /// Normalizes a descriptor, resolving `$fn` predicate names
    /// against the given table.
    pub fn from_value_with(descriptor: &Value, fns: &FnTable) -> Result<Self, DefineError> {
        let root = normalize::normalize_node(descriptor, fns)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// The root node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }
}

impl fmt::Display for Schema {
    /// Canonical render: deterministic, directive-sorted, fields in
    /// declaration order. Doubles as the fingerprint pre-image and as
    /// a printable debug form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::render_node(self.root(), f)
    }
}
