//! Program execution
//!
//! One depth-first pass over the input in field declaration order.
//! Checks per node: null handling, type, range, length, `$allowed`,
//! `$exp`, `$fn`, then recursion for containers. The output mirror is
//! built as the walk goes; defaults are deep-cloned per invocation.

use serde_json::{Map, Value};

use crate::diag::{Accumulator, ErrorCode, Path, SchemaError};
use crate::expr;
use crate::misc::{compare_big_int, deep_clone, deep_equal};
use crate::schema::Verdict;

use super::program::{FieldProg, NodeProg, ProgBody, Program};

impl Program {
    /// Runs the routine over an input, returning the fresh output or
    /// the collected diagnostics. The input is read-only.
    pub fn run(&self, input: &Value) -> Result<Value, SchemaError> {
        let mut acc = Accumulator::new(self.accumulate);
        let mut path = Path::root();
        let out = exec(&self.root, input, &mut path, &mut acc)?;
        acc.finish()?;
        Ok(out)
    }
}

/// Executes one node. In accumulation mode a failed node contributes
/// `null` to the (discarded) output and the walk continues.
fn exec(
    prog: &NodeProg,
    value: &Value,
    path: &mut Path,
    acc: &mut Accumulator,
) -> Result<Value, SchemaError> {
    if value.is_null() {
        if prog.nullable {
            return Ok(Value::Null);
        }
        acc.report(prog.expected.clone(), path)?;
        return Ok(Value::Null);
    }

    if prog.empty && value.as_str() == Some("") {
        return Ok(value.clone());
    }

    match &prog.body {
        ProgBody::Scalar => exec_scalar(prog, value, path, acc),
        ProgBody::Object {
            fields,
            drop_unknown,
            delta,
        } => exec_object(prog, fields, *drop_unknown, *delta, value, path, acc),
        ProgBody::Map { value: value_prog } => exec_map(prog, value_prog, value, path, acc),
        ProgBody::Array { element } => exec_array(prog, element, value, path, acc),
    }
}

fn exec_scalar(
    prog: &NodeProg,
    value: &Value,
    path: &mut Path,
    acc: &mut Accumulator,
) -> Result<Value, SchemaError> {
    let scalar = prog.scalar.as_ref().expect("scalar body carries a type");

    // The `$empty` admission already happened; an empty string
    // reaching a string-like check here is a rejection.
    if value.as_str() == Some("") && scalar.is_string_like() {
        acc.report(ErrorCode::InvalidValue, path)?;
        return Ok(Value::Null);
    }

    if let Err(code) = scalar.check(value) {
        acc.report(code, path)?;
        return Ok(Value::Null);
    }

    if let Some(n) = value.as_f64() {
        let out_of_range = prog.min.is_some_and(|min| n < min)
            || prog.max.is_some_and(|max| n > max)
            || prog.min_exclusive.is_some_and(|min| n <= min)
            || prog.max_exclusive.is_some_and(|max| n >= max);
        if out_of_range {
            acc.report(ErrorCode::OutOfRange, path)?;
            return Ok(Value::Null);
        }
    }

    if let Some(s) = value.as_str() {
        if let Some(min) = &prog.big_min {
            if compare_big_int(s, min).is_lt() {
                acc.report(ErrorCode::OutOfRange, path)?;
                return Ok(Value::Null);
            }
        }
        if let Some(max) = &prog.big_max {
            if compare_big_int(s, max).is_gt() {
                acc.report(ErrorCode::OutOfRange, path)?;
                return Ok(Value::Null);
            }
        }
        if prog.min_length.is_some() || prog.max_length.is_some() {
            let len = s.chars().count() as u64;
            if prog.min_length.is_some_and(|min| len < min)
                || prog.max_length.is_some_and(|max| len > max)
            {
                acc.report(ErrorCode::LengthConstraint, path)?;
                return Ok(Value::Null);
            }
        }
    }

    if let Some(allowed) = &prog.allowed {
        if !allowed.iter().any(|candidate| deep_equal(candidate, value)) {
            acc.report(ErrorCode::InvalidValue, path)?;
            return Ok(Value::Null);
        }
    }

    if let Some(ast) = &prog.exp {
        // Expressions are restricted to numeric types at definition
        // time, so the value is a number here.
        let x = value.as_f64().unwrap_or(f64::NAN);
        if !expr::truthy(expr::eval(ast, x)) {
            acc.report(ErrorCode::InvalidValue, path)?;
            return Ok(Value::Null);
        }
    }

    if let Some(func) = &prog.func {
        match func.call(value) {
            Verdict::Pass => {}
            Verdict::Fail => {
                acc.report(ErrorCode::InvalidValue, path)?;
                return Ok(Value::Null);
            }
            Verdict::FailWith(code) => {
                acc.report(ErrorCode::Custom(code), path)?;
                return Ok(Value::Null);
            }
        }
    }

    Ok(value.clone())
}

fn exec_object(
    prog: &NodeProg,
    fields: &[FieldProg],
    drop_unknown: bool,
    delta: bool,
    value: &Value,
    path: &mut Path,
    acc: &mut Accumulator,
) -> Result<Value, SchemaError> {
    let input = match value.as_object() {
        Some(map) => map,
        None => {
            acc.report(prog.expected.clone(), path)?;
            return Ok(Value::Null);
        }
    };

    let mut out = Map::new();
    for field in fields {
        path.push_field(&field.name);
        match input.get(&field.name) {
            Some(child) => {
                if !field.writable {
                    acc.report(ErrorCode::NoAccess, path)?;
                } else {
                    let result = exec(&field.prog, child, path, acc)?;
                    out.insert(field.name.clone(), result);
                }
            }
            None => {
                if let (Some(default), false) = (&field.default, delta) {
                    out.insert(field.name.clone(), deep_clone(default));
                } else if !(field.optional || delta) {
                    acc.report(ErrorCode::MissingProperty, path)?;
                }
            }
        }
        path.pop();
    }

    for key in input.keys() {
        if fields.iter().any(|f| f.name == *key) {
            continue;
        }
        if !drop_unknown {
            path.push_field(key);
            acc.report(ErrorCode::UnexpectedProperty, path)?;
            path.pop();
        }
    }

    Ok(Value::Object(out))
}

fn exec_map(
    prog: &NodeProg,
    value_prog: &NodeProg,
    value: &Value,
    path: &mut Path,
    acc: &mut Accumulator,
) -> Result<Value, SchemaError> {
    let input = match value.as_object() {
        Some(map) => map,
        None => {
            acc.report(prog.expected.clone(), path)?;
            return Ok(Value::Null);
        }
    };

    let len = input.len() as u64;
    if prog.min_length.is_some_and(|min| len < min)
        || prog.max_length.is_some_and(|max| len > max)
    {
        acc.report(ErrorCode::LengthConstraint, path)?;
        return Ok(Value::Null);
    }

    let mut out = Map::new();
    for (key, child) in input {
        path.push_field(key);
        let result = exec(value_prog, child, path, acc)?;
        out.insert(key.clone(), result);
        path.pop();
    }
    Ok(Value::Object(out))
}

fn exec_array(
    prog: &NodeProg,
    element: &NodeProg,
    value: &Value,
    path: &mut Path,
    acc: &mut Accumulator,
) -> Result<Value, SchemaError> {
    let input = match value.as_array() {
        Some(items) => items,
        None => {
            acc.report(prog.expected.clone(), path)?;
            return Ok(Value::Null);
        }
    };

    let len = input.len() as u64;
    if prog.min_length.is_some_and(|min| len < min)
        || prog.max_length.is_some_and(|max| len > max)
    {
        acc.report(ErrorCode::LengthConstraint, path)?;
        return Ok(Value::Null);
    }

    let mut out = Vec::with_capacity(input.len());
    for (i, item) in input.iter().enumerate() {
        path.push_index(i);
        out.push(exec(element, item, path, acc)?);
        path.pop();
    }
    Ok(Value::Array(out))
}
