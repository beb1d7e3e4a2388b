//! Structural equality and cloning over JSON values
//!
//! `serde_json::Value` is acyclic by construction and cannot hold NaN,
//! so the pathological cases (reference cycles, NaN self-equality) are
//! excluded by the representation itself.

use serde_json::Value;

/// Structural equality over scalars, ordered sequences, and objects.
///
/// Objects are equal when their key sets are equal and every value
/// compares equal recursively. An explicit key bound to `null` is not
/// equal to an absent key.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            // Compare numerically so 1 and 1.0 agree.
            match (x.as_f64(), y.as_f64()) {
                (Some(fx), Some(fy)) => fx == fy,
                _ => x == y,
            }
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| match ys.get(k) {
                    Some(y) => deep_equal(x, y),
                    None => false,
                })
        }
        _ => false,
    }
}

/// Structural copy of a JSON value.
///
/// Every reference in the source becomes an independent copy; aliasing
/// is never preserved. Inputs are expected to be acyclic, which
/// `serde_json::Value` guarantees.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), deep_clone(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_equal() {
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(deep_equal(&json!("x"), &json!("x")));
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(!deep_equal(&json!(true), &json!(false)));
        assert!(!deep_equal(&json!(1), &json!("1")));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_arrays_ordered() {
        assert!(deep_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn test_objects_key_set_equality() {
        assert!(deep_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_explicit_null_not_equal_to_absent() {
        assert!(!deep_equal(&json!({"a": null}), &json!({})));
    }

    #[test]
    fn test_nested_structures() {
        let a = json!({"x": [{"y": [1, 2]}, {"z": null}]});
        let b = json!({"x": [{"y": [1, 2]}, {"z": null}]});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_clone_round_trips_equality() {
        let v = json!({"a": [1, "two", {"three": 3.0}], "b": null});
        assert!(deep_equal(&deep_clone(&v), &v));
    }

    #[test]
    fn test_clone_is_independent() {
        let v = json!({"a": {"b": 1}});
        let mut c = deep_clone(&v);
        c["a"]["b"] = json!(2);
        assert_eq!(v["a"]["b"], json!(1));
    }
}
