//! Canonical schema rendering
//!
//! Deterministic textual form of a normalized schema: directives in a
//! fixed order, fields in declaration order. The engine fingerprints
//! this text; it is also the printable debug form.

use std::fmt;

use crate::misc::escape_field_name;
use crate::types::ScalarType;

use super::node::{GroupTag, NodeBody, SchemaNode, UniqueSpec};

pub(super) fn render_node(node: &SchemaNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{type: {}", node.type_name)?;
    render_meta(node, f)?;
    match &node.body {
        NodeBody::Scalar(scalar) => render_scalar_params(scalar, f)?,
        NodeBody::Object(body) => {
            write!(f, ", fields: {{")?;
            for (i, (name, child)) in body.fields.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: ", escape_field_name(name))?;
                render_node(child, f)?;
            }
            write!(f, "}}")?;
            if !body.unique_array.is_empty() {
                write!(f, ", unique: {:?}", body.unique_array)?;
            }
        }
        NodeBody::Map { value } => {
            write!(f, ", value: ")?;
            render_node(value, f)?;
        }
        NodeBody::Array(body) => {
            write!(f, ", element: ")?;
            render_node(&body.element, f)?;
        }
    }
    write!(f, "}}")
}

fn render_meta(node: &SchemaNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let meta = &node.meta;
    if meta.nullable {
        write!(f, ", nullable")?;
    }
    if meta.optional {
        write!(f, ", optional")?;
    }
    if let Some(default) = &meta.default {
        write!(f, ", default: {}", default)?;
    }
    if let Some(allowed) = &meta.allowed {
        write!(f, ", allowed: {:?}", allowed)?;
    }
    if meta.empty {
        write!(f, ", empty")?;
    }
    if let Some(n) = meta.min_length {
        write!(f, ", minLength: {}", n)?;
    }
    if let Some(n) = meta.max_length {
        write!(f, ", maxLength: {}", n)?;
    }
    if let Some(n) = meta.min {
        write!(f, ", min: {}", n)?;
    }
    if let Some(n) = meta.max {
        write!(f, ", max: {}", n)?;
    }
    if let Some(n) = meta.min_exclusive {
        write!(f, ", minExclusive: {}", n)?;
    }
    if let Some(n) = meta.max_exclusive {
        write!(f, ", maxExclusive: {}", n)?;
    }
    if let Some(s) = &meta.big_min {
        write!(f, ", min: {}", s)?;
    }
    if let Some(s) = &meta.big_max {
        write!(f, ", max: {}", s)?;
    }
    if let Some((src, _)) = &meta.exp {
        write!(f, ", exp: {}", src)?;
    }
    if let Some(func) = &meta.func {
        write!(f, ", fn: {}", func.name())?;
    }
    match &meta.group {
        GroupTag::Default => {}
        GroupTag::Named(g) => write!(f, ", g: {}", g)?,
        GroupTag::Excluded => write!(f, ", g: null")?,
    }
    if meta.pk {
        write!(f, ", pk")?;
    }
    if let Some((table, column)) = &meta.fk {
        write!(f, ", fk: {}.{}", table, column)?;
    }
    match &meta.unique {
        None => {}
        Some(UniqueSpec::Single) => write!(f, ", unique")?,
        Some(UniqueSpec::Groups(groups)) => write!(f, ", unique: {}", groups.join("|"))?,
    }
    if let Some(expr) = &meta.read {
        write!(f, ", r: {}", expr.source)?;
    }
    if let Some(expr) = &meta.write {
        write!(f, ", w: {}", expr.source)?;
    }
    if let Some(expr) = &meta.all {
        write!(f, ", a: {}", expr.source)?;
    }
    if let Some(delta) = meta.delta {
        write!(f, ", delta: {}", delta)?;
    }
    if let NodeBody::Object(body) = &node.body {
        render_key_map(f, "pkMap", &body.pk_map)?;
        render_key_map(f, "idMap", &body.id_map)?;
    }
    Ok(())
}

fn render_key_map(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    map: &[(String, bool)],
) -> fmt::Result {
    if map.is_empty() {
        return Ok(());
    }
    write!(f, ", {}: {{", label)?;
    for (i, (name, member)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", escape_field_name(name), member)?;
    }
    write!(f, "}}")
}

fn render_scalar_params(scalar: &ScalarType, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match scalar {
        ScalarType::Numeric { precision, scale } => {
            write!(f, ", precision: {}, scale: {}", precision, scale)
        }
        ScalarType::Char { allowed: Some(set) } => write!(f, ", chars: {}", set),
        ScalarType::Color {
            css_names,
            extra_names,
        } => {
            if !css_names {
                write!(f, ", cssNames: false")?;
            }
            if !extra_names.is_empty() {
                let names: Vec<&str> = extra_names.iter().map(|(n, _)| n.as_str()).collect();
                write!(f, ", extraNames: {:?}", names)?;
            }
            Ok(())
        }
        ScalarType::Isbn { format } => write!(f, ", form: {:?}", format),
        ScalarType::Mac { separator } => write!(f, ", separator: {:?}", separator),
        ScalarType::Ip { format, port } => {
            write!(f, ", form: {:?}", format)?;
            if *port {
                write!(f, ", port")?;
            }
            Ok(())
        }
        ScalarType::Uuid { version, format } => {
            write!(f, ", version: {:?}, form: {:?}", version, format)
        }
        ScalarType::DateTime(spec) => write!(f, ", format: {:?}", spec),
        _ => Ok(()),
    }
}
