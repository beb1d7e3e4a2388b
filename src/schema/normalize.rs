//! Descriptor normalization
//!
//! Turns an authored descriptor tree into normalized nodes:
//! `$extend`/`$include` expansion at the descriptor level, shorthand
//! parsing, registry resolution, directive validation, and metadata
//! derivation. Every error raised here is a [`DefineError`] — no
//! input value is involved yet.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::diag::DefineError;
use crate::misc::{is_big_int, unescape_field_name};
use crate::types::{self, BaseType, ScalarType};

use super::access::AccessExpr;
use super::derive::derive_object;
use super::node::{
    ArrayBody, Directives, FnTable, GroupTag, NodeBody, Predicate, SchemaNode, UniqueSpec,
};
use super::shorthand;

/// Directives recognized on every node.
const COMMON_DIRECTIVES: &[&str] = &[
    "$type",
    "$nullable",
    "$optional",
    "$default",
    "$allowed",
    "$empty",
    "$length",
    "$minLength",
    "$maxLength",
    "$min",
    "$max",
    "$minExclusive",
    "$maxExclusive",
    "$fn",
    "$exp",
    "$g",
    "$pk",
    "$fk",
    "$unique",
    "$r",
    "$w",
    "$a",
    "$delta",
];

fn bad(reason: impl Into<String>) -> DefineError {
    DefineError::BadDescriptor(reason.into())
}

fn bad_directive(directive: &str, reason: impl Into<String>) -> DefineError {
    DefineError::BadDirective {
        directive: directive.to_string(),
        reason: reason.into(),
    }
}

/// Normalizes one descriptor node.
pub(super) fn normalize_node(
    descriptor: &Value,
    fns: &FnTable,
) -> Result<SchemaNode, DefineError> {
    match descriptor {
        Value::String(shorthand) => typed_node(shorthand, &Map::new(), fns),
        Value::Object(map) => {
            let expanded = expand(map)?;
            match expanded.get("$type") {
                Some(Value::String(type_str)) => {
                    let type_str = type_str.clone();
                    typed_node(&type_str, &expanded, fns)
                }
                Some(_) => Err(bad("$type must be a string")),
                None => object_node(&expanded, fns),
            }
        }
        _ => Err(bad("descriptor must be a mapping or a $type string")),
    }
}

// ---------------------------------------------------------------------------
// $extend / $include expansion (descriptor level)
// ---------------------------------------------------------------------------

/// Expands `$extend` and `$include` directives, returning a plain
/// descriptor map with neither present.
fn expand(map: &Map<String, Value>) -> Result<Map<String, Value>, DefineError> {
    let mut out: Map<String, Value>;

    if let Some(base) = map.get("$extend") {
        let base_map = base
            .as_object()
            .ok_or_else(|| bad_directive("$extend", "base must be a mapping"))?;
        out = expand(base_map)?;
        for (key, value) in map {
            if key == "$extend" || is_include_key(key) {
                continue;
            }
            merge_entry(&mut out, key, value);
        }
    } else {
        out = Map::new();
        for (key, value) in map {
            if is_include_key(key) {
                continue;
            }
            out.insert(key.clone(), value.clone());
        }
    }

    for (key, value) in map {
        if !is_include_key(key) {
            continue;
        }
        let included: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for inc in included {
            let inc_map = inc
                .as_object()
                .ok_or_else(|| bad_directive(key, "included schema must be a mapping"))?;
            let inc_expanded = expand(inc_map)?;
            for (field, field_schema) in &inc_expanded {
                if field.starts_with('$') {
                    continue;
                }
                if out.contains_key(field) {
                    return Err(DefineError::IncludeCollision(field.clone()));
                }
                out.insert(field.clone(), field_schema.clone());
            }
        }
    }

    Ok(out)
}

fn is_include_key(key: &str) -> bool {
    key.starts_with("$include")
}

/// Applies one `$extend` override: `null` deletes (the descriptor
/// surface has no `undefined`), mappings merge recursively, anything
/// else replaces.
fn merge_entry(out: &mut Map<String, Value>, key: &str, value: &Value) {
    if value.is_null() {
        out.remove(key);
        return;
    }
    if let (Some(Value::Object(base)), Value::Object(over)) = (out.get(key), value) {
        let mut merged = base.clone();
        for (k, v) in over {
            merge_entry(&mut merged, k, v);
        }
        out.insert(key.to_string(), Value::Object(merged));
        return;
    }
    out.insert(key.to_string(), value.clone());
}

// ---------------------------------------------------------------------------
// Typed nodes
// ---------------------------------------------------------------------------

/// Kinds of directive bags, deciding which constraints apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaKind {
    Numeric,
    Big,
    StringLike,
    /// `any`, `bool`: no value-shape constraints beyond `$allowed`.
    Opaque,
    Object,
    /// Arrays and maps: `$length` counts elements.
    Collection,
}

fn scalar_meta_kind(scalar: &ScalarType) -> MetaKind {
    if scalar.is_numeric() {
        MetaKind::Numeric
    } else if scalar.is_big() {
        MetaKind::Big
    } else if scalar.is_string_like() {
        MetaKind::StringLike
    } else {
        MetaKind::Opaque
    }
}

fn typed_node(
    type_str: &str,
    bag: &Map<String, Value>,
    fns: &FnTable,
) -> Result<SchemaNode, DefineError> {
    let parsed = shorthand::parse(type_str)?;
    let has_dims = !parsed.dims.is_empty();
    let base = types::resolve(&parsed.base, bag)?;
    let registry_name = match parsed.base.find('(') {
        Some(i) => &parsed.base[..i],
        None => parsed.base.as_str(),
    };
    validate_directives(registry_name, bag, matches!(base, BaseType::Object))?;

    let mut node = match base {
        BaseType::Scalar(scalar) => {
            // A string-form $allowed enumerates characters and only
            // makes sense for char, where it lives in the scalar
            // parameters rather than the literal list.
            if matches!(bag.get("$allowed"), Some(Value::String(_)))
                && !matches!(scalar, ScalarType::Char { .. })
            {
                return Err(bad_directive("$allowed", "expected a sequence of literals"));
            }
            let kind = scalar_meta_kind(&scalar);
            SchemaNode {
                type_name: registry_name.to_string(),
                meta: build_meta(bag, kind, has_dims, fns)?,
                body: NodeBody::Scalar(scalar),
            }
        }
        BaseType::Object => object_node(bag, fns)?,
        BaseType::Map => {
            let data = bag
                .get("$data")
                .ok_or_else(|| bad_directive("$data", "map requires a value schema"))?;
            let value = normalize_node(data, fns)?;
            SchemaNode {
                type_name: "map".to_string(),
                meta: build_meta(bag, MetaKind::Collection, has_dims, fns)?,
                body: NodeBody::Map {
                    value: Arc::new(value),
                },
            }
        }
        BaseType::Array => {
            let data = bag
                .get("$data")
                .ok_or_else(|| bad_directive("$data", "array requires an element schema"))?;
            let element = normalize_node(data, fns)?;
            SchemaNode {
                type_name: "array".to_string(),
                meta: build_meta(bag, MetaKind::Collection, has_dims, fns)?,
                body: NodeBody::Array(ArrayBody {
                    element: Arc::new(element),
                }),
            }
        }
    };

    if parsed.dims.is_empty() {
        node.meta.nullable = node.meta.nullable || parsed.base_nullable;
        return Ok(node);
    }

    // Array dimensions: the base node keeps the value constraints,
    // the outermost array carries the field-level directives.
    node.meta.nullable = parsed.base_nullable;
    let field_meta = split_field_meta(&mut node.meta);

    for (i, dim) in parsed.dims.iter().enumerate().rev() {
        let meta = Directives {
            nullable: dim.nullable,
            min_length: dim.min,
            max_length: dim.max,
            ..Directives::default()
        };
        node = SchemaNode {
            type_name: "array".to_string(),
            meta,
            body: NodeBody::Array(ArrayBody {
                element: Arc::new(node),
            }),
        };
        if i == 0 {
            apply_field_meta(&mut node.meta, field_meta, bag)?;
            break;
        }
    }
    Ok(node)
}

/// Field-level directives that move from the base to the outermost
/// array node when shorthand dimensions are present.
struct FieldMeta {
    optional: bool,
    default: Option<Value>,
    group: GroupTag,
    pk: bool,
    fk: Option<(String, String)>,
    unique: Option<UniqueSpec>,
    read: Option<AccessExpr>,
    write: Option<AccessExpr>,
    all: Option<AccessExpr>,
    delta: Option<bool>,
}

fn split_field_meta(meta: &mut Directives) -> FieldMeta {
    FieldMeta {
        optional: std::mem::take(&mut meta.optional),
        default: meta.default.take(),
        group: std::mem::take(&mut meta.group),
        pk: std::mem::take(&mut meta.pk),
        fk: meta.fk.take(),
        unique: meta.unique.take(),
        read: meta.read.take(),
        write: meta.write.take(),
        all: meta.all.take(),
        delta: meta.delta.take(),
    }
}

fn apply_field_meta(
    meta: &mut Directives,
    field: FieldMeta,
    bag: &Map<String, Value>,
) -> Result<(), DefineError> {
    if let Some(default) = &field.default {
        if !default.is_array() && !default.is_null() {
            return Err(DefineError::BadDefault {
                type_name: "array".to_string(),
                detail: "default has the wrong shape".to_string(),
            });
        }
    }
    meta.optional = field.optional;
    meta.default = field.default;
    meta.group = field.group;
    meta.pk = field.pk;
    meta.fk = field.fk;
    meta.unique = field.unique;
    meta.read = field.read;
    meta.write = field.write;
    meta.all = field.all;
    meta.delta = field.delta;
    // An explicit $nullable marks the outermost level; explicit
    // length directives override shorthand bounds there too.
    if get_bool(bag, "$nullable")?.unwrap_or(false) {
        meta.nullable = true;
    }
    let (min_length, max_length) = length_bounds(bag)?;
    if min_length.is_some() {
        meta.min_length = min_length;
    }
    if max_length.is_some() {
        meta.max_length = max_length;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Object nodes
// ---------------------------------------------------------------------------

fn object_node(bag: &Map<String, Value>, fns: &FnTable) -> Result<SchemaNode, DefineError> {
    validate_directives("object", bag, true)?;
    let mut fields: Vec<(String, Arc<SchemaNode>)> = Vec::new();
    for (key, value) in bag {
        if key.starts_with('$') {
            continue;
        }
        let name = unescape_field_name(key);
        if fields.iter().any(|(n, _)| *n == name) {
            return Err(bad(format!("duplicate field '{}'", name)));
        }
        let child = normalize_node(value, fns)?;
        fields.push((name, Arc::new(child)));
    }
    let body = derive_object(fields);
    Ok(SchemaNode {
        type_name: "object".to_string(),
        meta: build_meta(bag, MetaKind::Object, false, fns)?,
        body: NodeBody::Object(body),
    })
}

// ---------------------------------------------------------------------------
// Directive validation and extraction
// ---------------------------------------------------------------------------

fn validate_directives(
    registry_name: &str,
    bag: &Map<String, Value>,
    fields_allowed: bool,
) -> Result<(), DefineError> {
    let specific = types::type_directives(registry_name);
    for key in bag.keys() {
        if key.starts_with('$') {
            if COMMON_DIRECTIVES.contains(&key.as_str()) || specific.contains(&key.as_str()) {
                continue;
            }
            return Err(DefineError::UnknownDirective {
                directive: key.clone(),
                type_name: registry_name.to_string(),
            });
        }
        if !fields_allowed {
            return Err(bad(format!(
                "unexpected property '{}' on type '{}'",
                key, registry_name
            )));
        }
    }
    Ok(())
}

fn build_meta(
    bag: &Map<String, Value>,
    kind: MetaKind,
    dims_present: bool,
    fns: &FnTable,
) -> Result<Directives, DefineError> {
    let mut meta = Directives {
        nullable: get_bool(bag, "$nullable")?.unwrap_or(false),
        optional: get_bool(bag, "$optional")?.unwrap_or(false),
        ..Directives::default()
    };

    meta.default = bag.get("$default").filter(|v| !v.is_null()).cloned();

    match bag.get("$allowed") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => meta.allowed = Some(items.clone()),
        Some(Value::String(_)) if kind == MetaKind::StringLike => {
            // char folds a string-form $allowed into its parameters.
        }
        Some(_) => return Err(bad_directive("$allowed", "expected a sequence of literals")),
    }

    match get_bool(bag, "$empty")? {
        None => {}
        Some(b) if kind == MetaKind::StringLike => meta.empty = b,
        Some(_) => return Err(bad_directive("$empty", "only string-like types take $empty")),
    }

    // With shorthand dimensions present the explicit length
    // directives belong to the outermost array, not the base.
    let (min_length, max_length) = length_bounds(bag)?;
    if (min_length.is_some() || max_length.is_some()) && !dims_present {
        if !matches!(kind, MetaKind::StringLike | MetaKind::Collection) {
            return Err(bad_directive(
                "$length",
                "length constraints apply to strings and collections",
            ));
        }
        meta.min_length = min_length;
        meta.max_length = max_length;
    }

    extract_range(bag, kind, &mut meta)?;

    match bag.get("$exp") {
        None | Some(Value::Null) => {}
        Some(Value::String(src)) => {
            if kind != MetaKind::Numeric {
                return Err(bad_directive("$exp", "expressions apply to numeric types"));
            }
            let ast = crate::expr::compile(src)?;
            meta.exp = Some((src.clone(), Arc::new(ast)));
        }
        Some(_) => return Err(bad_directive("$exp", "expected an expression string")),
    }

    match bag.get("$fn") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => {
            let f = fns
                .get(name)
                .ok_or_else(|| DefineError::UnknownPredicate(name.clone()))?;
            meta.func = Some(Predicate::new(name.clone(), f));
        }
        Some(_) => return Err(bad_directive("$fn", "expected a predicate name")),
    }

    meta.group = match bag.get("$g") {
        None => GroupTag::Default,
        Some(Value::Null) => GroupTag::Excluded,
        Some(Value::String(s)) if s.is_empty() => GroupTag::Default,
        Some(Value::String(s)) => GroupTag::Named(s.clone()),
        Some(_) => return Err(bad_directive("$g", "expected a group name or null")),
    };

    meta.pk = get_bool(bag, "$pk")?.unwrap_or(false);

    meta.fk = match bag.get("$fk") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match s.split_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Some((table.to_string(), column.to_string()))
            }
            _ => return Err(bad_directive("$fk", "expected 'table.column'")),
        },
        Some(_) => return Err(bad_directive("$fk", "expected 'table.column'")),
    };

    meta.unique = match bag.get("$unique") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(UniqueSpec::Single),
        Some(Value::String(s)) => {
            let groups: Vec<String> = s.split('|').map(|g| g.trim().to_string()).collect();
            if groups.iter().any(String::is_empty) {
                return Err(bad_directive("$unique", "empty group name"));
            }
            Some(UniqueSpec::Groups(groups))
        }
        Some(_) => return Err(bad_directive("$unique", "expected a flag or group names")),
    };

    // $a is kept as authored and also stands in for absent $r/$w.
    meta.all = get_access(bag, "$a")?;
    meta.read = match get_access(bag, "$r")? {
        Some(expr) => Some(expr),
        None => meta.all.clone(),
    };
    meta.write = match get_access(bag, "$w")? {
        Some(expr) => Some(expr),
        None => meta.all.clone(),
    };

    meta.delta = get_bool(bag, "$delta")?;

    // With dimensions the default describes the outermost array and
    // is checked when it lands there.
    if !dims_present {
        validate_default(&meta, kind, bag)?;
    }
    Ok(meta)
}

fn extract_range(
    bag: &Map<String, Value>,
    kind: MetaKind,
    meta: &mut Directives,
) -> Result<(), DefineError> {
    let keys = ["$min", "$max", "$minExclusive", "$maxExclusive"];
    let present = keys.iter().any(|k| matches!(bag.get(*k), Some(v) if !v.is_null()));
    if !present {
        return Ok(());
    }
    match kind {
        MetaKind::Numeric => {
            meta.min = get_f64(bag, "$min")?;
            meta.max = get_f64(bag, "$max")?;
            meta.min_exclusive = get_f64(bag, "$minExclusive")?;
            meta.max_exclusive = get_f64(bag, "$maxExclusive")?;
            Ok(())
        }
        MetaKind::Big => {
            meta.big_min = get_big(bag, "$min")?;
            meta.big_max = get_big(bag, "$max")?;
            if get_big(bag, "$minExclusive")?.is_some() || get_big(bag, "$maxExclusive")?.is_some()
            {
                return Err(bad_directive(
                    "$minExclusive",
                    "big-integer bounds are inclusive only",
                ));
            }
            Ok(())
        }
        _ => Err(bad_directive("$min", "range bounds apply to numeric types")),
    }
}

/// Best-effort compile-time check of `$default` against the node's
/// own type; nested container contents are not descended into.
fn validate_default(
    meta: &Directives,
    kind: MetaKind,
    bag: &Map<String, Value>,
) -> Result<(), DefineError> {
    let default = match &meta.default {
        Some(v) => v,
        None => return Ok(()),
    };
    let type_name = bag
        .get("$type")
        .and_then(Value::as_str)
        .unwrap_or("object");
    let ok = match kind {
        MetaKind::Numeric => default.is_number(),
        MetaKind::Big => default.as_str().is_some_and(is_big_int),
        MetaKind::StringLike => default.is_string(),
        MetaKind::Opaque => true,
        MetaKind::Object => default.is_object(),
        MetaKind::Collection => default.is_array() || default.is_object(),
    };
    if ok {
        Ok(())
    } else {
        Err(DefineError::BadDefault {
            type_name: type_name.to_string(),
            detail: "default has the wrong shape".to_string(),
        })
    }
}

fn length_bounds(bag: &Map<String, Value>) -> Result<(Option<u64>, Option<u64>), DefineError> {
    if let Some(exact) = get_u64(bag, "$length")? {
        if get_u64(bag, "$minLength")?.is_some() || get_u64(bag, "$maxLength")?.is_some() {
            return Err(bad_directive(
                "$length",
                "exact length excludes min/max length",
            ));
        }
        return Ok((Some(exact), Some(exact)));
    }
    let min = get_u64(bag, "$minLength")?;
    let max = get_u64(bag, "$maxLength")?;
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(bad_directive("$minLength", "bounds are inverted"));
        }
    }
    Ok((min, max))
}

fn get_access(bag: &Map<String, Value>, key: &str) -> Result<Option<AccessExpr>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => AccessExpr::parse(s).map(Some),
        Some(_) => Err(bad_directive(key, "expected an access expression string")),
    }
}

fn get_bool(bag: &Map<String, Value>, key: &str) -> Result<Option<bool>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(bad_directive(key, "expected a boolean")),
    }
}

fn get_u64(bag: &Map<String, Value>, key: &str) -> Result<Option<u64>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| bad_directive(key, "expected a non-negative integer")),
    }
}

fn get_f64(bag: &Map<String, Value>, key: &str) -> Result<Option<f64>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| bad_directive(key, "expected a number")),
    }
}

fn get_big(bag: &Map<String, Value>, key: &str) -> Result<Option<String>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if is_big_int(s) => Ok(Some(s.clone())),
        Some(_) => Err(bad_directive(key, "expected a big-integer string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(descriptor: Value) -> SchemaNode {
        normalize_node(&descriptor, &FnTable::new()).unwrap()
    }

    #[test]
    fn test_string_descriptor_is_shorthand() {
        let n = node(json!("int8"));
        assert_eq!(n.type_name, "int8");
        assert!(matches!(n.body, NodeBody::Scalar(_)));
    }

    #[test]
    fn test_object_without_type_directive() {
        let n = node(json!({"a": "int", "b": "bool"}));
        assert_eq!(n.type_name, "object");
        let body = match &n.body {
            NodeBody::Object(body) => body,
            other => panic!("unexpected {:?}", other),
        };
        let names: Vec<&str> = body.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_dims_wrap_outer_to_inner() {
        let n = node(json!({"$type": "int[2][3]"}));
        assert_eq!(n.type_name, "array");
        assert_eq!(n.meta.min_length, Some(2));
        let inner = match &n.body {
            NodeBody::Array(body) => &body.element,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(inner.type_name, "array");
        assert_eq!(inner.meta.min_length, Some(3));
        let base = match &inner.body {
            NodeBody::Array(body) => &body.element,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(base.type_name, "int");
    }

    #[test]
    fn test_field_meta_moves_to_outermost() {
        let n = node(json!({"$type": "int[]", "$optional": true, "$g": "stats"}));
        assert!(n.meta.optional);
        assert_eq!(n.meta.group, GroupTag::Named("stats".into()));
        let base = match &n.body {
            NodeBody::Array(body) => &body.element,
            other => panic!("unexpected {:?}", other),
        };
        assert!(!base.meta.optional);
        assert_eq!(base.meta.group, GroupTag::Default);
    }

    #[test]
    fn test_value_constraints_stay_on_base() {
        let n = node(json!({"$type": "int[]", "$min": 5}));
        let base = match &n.body {
            NodeBody::Array(body) => &body.element,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(base.meta.min, Some(5.0));
        assert_eq!(n.meta.min, None);
    }

    #[test]
    fn test_explicit_length_overrides_dim_bounds() {
        let n = node(json!({"$type": "int[2:4]", "$maxLength": 3}));
        assert_eq!(n.meta.min_length, Some(2));
        assert_eq!(n.meta.max_length, Some(3));
    }

    #[test]
    fn test_expand_extend_merges_and_deletes() {
        let merged = expand(
            json!({
                "$extend": {"a": {"$type": "int"}, "b": {"$type": "bool"}},
                "b": null,
                "c": {"$type": "string"},
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();
        assert!(merged.contains_key("a"));
        assert!(!merged.contains_key("b"));
        assert!(merged.contains_key("c"));
        assert!(!merged.contains_key("$extend"));
    }

    #[test]
    fn test_expand_include_disjointness() {
        let result = expand(
            json!({
                "$include": {"x": {"$type": "int"}},
                "x": {"$type": "int"},
            })
            .as_object()
            .unwrap(),
        );
        assert!(matches!(result, Err(DefineError::IncludeCollision(_))));
    }

    #[test]
    fn test_group_tag_normalization() {
        let n = node(json!({
            "plain": {"$type": "int"},
            "named": {"$type": "int", "$g": "grp"},
            "blank": {"$type": "int", "$g": ""},
            "out": {"$type": "int", "$g": null},
        }));
        let body = match &n.body {
            NodeBody::Object(body) => body,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(body.field("plain").unwrap().meta.group, GroupTag::Default);
        assert_eq!(
            body.field("named").unwrap().meta.group,
            GroupTag::Named("grp".into())
        );
        assert_eq!(body.field("blank").unwrap().meta.group, GroupTag::Default);
        assert_eq!(body.field("out").unwrap().meta.group, GroupTag::Excluded);
    }

    #[test]
    fn test_scalar_descriptor_kinds_rejected() {
        assert!(normalize_node(&json!(42), &FnTable::new()).is_err());
        assert!(normalize_node(&json!([1]), &FnTable::new()).is_err());
        assert!(normalize_node(&json!(true), &FnTable::new()).is_err());
    }
}
