//! Normalized schema nodes

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::types::ScalarType;

use super::access::AccessExpr;

/// Outcome of an external `$fn` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    /// Fail with a caller-supplied diagnostic code.
    FailWith(String),
}

type PredicateFn = dyn Fn(&Value) -> Verdict + Send + Sync;

/// A named external predicate bound through `$fn`.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    f: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, f: Arc<PredicateFn>) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, value: &Value) -> Verdict {
        (self.f)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

/// Named predicates available to `$fn` directives during
/// normalization.
#[derive(Default, Clone)]
pub struct FnTable {
    map: HashMap<String, Arc<PredicateFn>>,
}

impl FnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate under a name.
    pub fn insert<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value) -> Verdict + Send + Sync + 'static,
    {
        self.map.insert(name.into(), Arc::new(f));
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<PredicateFn>> {
        self.map.get(name).cloned()
    }
}

impl fmt::Debug for FnTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTable")
            .field("names", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Group membership of a field (`$g`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupTag {
    /// Missing or empty tag: the `@default` group.
    #[default]
    Default,
    /// A named group.
    Named(String),
    /// Explicit `null`: the field belongs to no group.
    Excluded,
}

/// Uniqueness declaration of a field (`$unique`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueSpec {
    /// `true`: the field alone forms a unique group.
    Single,
    /// Named groups, from `"g"` or `"g1|g2"`.
    Groups(Vec<String>),
}

/// Common directives of one normalized node.
///
/// Type-specific parameters live inside the resolved [`ScalarType`];
/// this struct carries only the type-agnostic control metadata.
#[derive(Debug, Clone, Default)]
pub struct Directives {
    pub nullable: bool,
    pub optional: bool,
    pub default: Option<Value>,
    /// Allowed literal values (`$allowed`). For `char`, a string-form
    /// `$allowed` is folded into the scalar parameters instead.
    pub allowed: Option<Vec<Value>>,
    /// Permits the empty string for string-like types.
    pub empty: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    /// Numeric bounds; applied to number-family types.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_exclusive: Option<f64>,
    pub max_exclusive: Option<f64>,
    /// Big-integer string bounds; applied to the bigint family.
    pub big_min: Option<String>,
    pub big_max: Option<String>,
    /// Compiled `$exp` predicate with its source text.
    pub exp: Option<(String, Arc<crate::expr::Ast>)>,
    /// Bound `$fn` predicate.
    pub func: Option<Predicate>,
    pub group: GroupTag,
    pub pk: bool,
    /// `$fk` target as `(table, column)`.
    pub fk: Option<(String, String)>,
    pub unique: Option<UniqueSpec>,
    pub read: Option<AccessExpr>,
    pub write: Option<AccessExpr>,
    /// `$a` as authored; also the fallback for absent `$r`/`$w`.
    pub all: Option<AccessExpr>,
    /// `$delta: false` locally disables delta-mode admission.
    pub delta: Option<bool>,
}

/// One normalized schema node: a resolved type name, the common
/// directives, and the type-shaped body.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Resolved registry name (`"int8"`, `"array"`, ...).
    pub type_name: String,
    pub meta: Directives,
    pub body: NodeBody,
}

/// Type-shaped part of a node.
#[derive(Debug, Clone)]
pub enum NodeBody {
    Scalar(ScalarType),
    Object(ObjectBody),
    Map { value: Arc<SchemaNode> },
    Array(ArrayBody),
}

/// An object node: fields plus derived metadata.
#[derive(Debug, Clone)]
pub struct ObjectBody {
    /// Fields in declaration order, names already unescaped.
    pub fields: Vec<(String, Arc<SchemaNode>)>,
    /// Group name to member fields, groups by first appearance.
    pub group_map: Vec<(String, Vec<String>)>,
    /// Primary-key membership by field name, declaration order.
    pub pk_map: Vec<(String, bool)>,
    /// Primary-key fields in declaration order.
    pub pk_array: Vec<String>,
    /// Foreign-key fields to their `table.column` targets.
    pub fk_map: Vec<(String, (String, String))>,
    /// Key membership (primary or foreign) by field name.
    pub id_map: Vec<(String, bool)>,
    /// Union of primary- and foreign-key fields.
    pub id_array: Vec<String>,
    /// Unique groups as sorted, deduplicated field-name tuples.
    pub unique_array: Vec<Vec<String>>,
}

impl ObjectBody {
    /// Looks up a field schema by (unescaped) name.
    pub fn field(&self, name: &str) -> Option<&Arc<SchemaNode>> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Foreign-key field names in declaration order.
    pub fn fk_array(&self) -> Vec<&str> {
        self.fk_map.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Member fields of a group, if the group exists.
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.group_map
            .iter()
            .find(|(g, _)| g == name)
            .map(|(_, fields)| fields.as_slice())
    }
}

/// An array node: the element schema and length bounds (held in the
/// node's `meta`).
#[derive(Debug, Clone)]
pub struct ArrayBody {
    pub element: Arc<SchemaNode>,
}

impl SchemaNode {
    /// The object body, when this node is an object.
    pub fn as_object(&self) -> Option<&ObjectBody> {
        match &self.body {
            NodeBody::Object(body) => Some(body),
            _ => None,
        }
    }

    /// The scalar type, when this node is a scalar.
    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match &self.body {
            NodeBody::Scalar(s) => Some(s),
            _ => None,
        }
    }
}
