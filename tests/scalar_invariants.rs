//! Scalar Type Invariant Tests
//!
//! For each numeric type with documented bounds [lo, hi], processing
//! succeeds iff the input is a finite integer (for integer types)
//! inside the bounds. Big integers travel as decimal strings with a
//! total order consistent with integer ordering.

use serde_json::json;
use trellis::{process, schema, ErrorCode, Options, Schema};

fn typed(name: &str) -> Schema {
    schema(&json!({ "$type": name })).unwrap()
}

fn passes(s: &Schema, v: serde_json::Value) -> bool {
    process(&v, s, Options::NONE, None).is_ok()
}

// =============================================================================
// Integer Widths
// =============================================================================

/// int8 accepts exactly [-128, 127].
#[test]
fn test_int8_bounds() {
    let s = typed("int8");
    assert!(passes(&s, json!(-128)));
    assert!(passes(&s, json!(127)));
    assert!(!passes(&s, json!(-129)));
    assert!(!passes(&s, json!(128)));
}

#[test]
fn test_uint8_bounds() {
    let s = typed("uint8");
    assert!(passes(&s, json!(0)));
    assert!(passes(&s, json!(255)));
    assert!(!passes(&s, json!(-1)));
    assert!(!passes(&s, json!(256)));
}

#[test]
fn test_int16_int24_int32_bounds() {
    assert!(passes(&typed("int16"), json!(32767)));
    assert!(!passes(&typed("int16"), json!(32768)));
    assert!(passes(&typed("int24"), json!(8388607)));
    assert!(!passes(&typed("int24"), json!(8388608)));
    assert!(passes(&typed("int32"), json!(2147483647)));
    assert!(!passes(&typed("int32"), json!(2147483648i64)));
}

#[test]
fn test_uint_width_bounds() {
    assert!(passes(&typed("uint16"), json!(65535)));
    assert!(!passes(&typed("uint16"), json!(65536)));
    assert!(passes(&typed("uint24"), json!(16777215)));
    assert!(!passes(&typed("uint24"), json!(16777216)));
    assert!(passes(&typed("uint32"), json!(4294967295u64)));
    assert!(!passes(&typed("uint32"), json!(4294967296u64)));
}

/// int53/uint53 bound at the 53-bit safe-integer limit.
#[test]
fn test_int53_bounds() {
    let max = (1i64 << 53) - 1;
    assert!(passes(&typed("int53"), json!(max)));
    assert!(!passes(&typed("int53"), json!(max + 1)));
    assert!(passes(&typed("int53"), json!(-max)));
    assert!(!passes(&typed("int53"), json!(-max - 1)));
    assert!(passes(&typed("uint53"), json!(max)));
    assert!(!passes(&typed("uint53"), json!(max + 1)));
    assert!(!passes(&typed("uint53"), json!(-1)));
}

/// Integer types reject booleans, strings, and fractional numbers.
#[test]
fn test_int_rejects_foreign_kinds() {
    let s = typed("int");
    assert!(!passes(&s, json!(true)));
    assert!(!passes(&s, json!("5")));
    assert!(!passes(&s, json!(1.5)));
    assert!(!passes(&s, json!(null)));
    assert!(!passes(&s, json!([1])));
}

/// The error code distinguishes wrong kind from out of range.
#[test]
fn test_int_error_codes() {
    let s = typed("int8");
    let err = process(&json!("x"), &s, Options::NONE, None).unwrap_err();
    assert_eq!(err.first().code, ErrorCode::ExpectedNumber);
    let err = process(&json!(1000), &s, Options::NONE, None).unwrap_err();
    assert_eq!(err.first().code, ErrorCode::OutOfRange);
}

// =============================================================================
// Floats, Decimals, Coordinates
// =============================================================================

#[test]
fn test_number_accepts_floats_and_ints() {
    let s = typed("number");
    assert!(passes(&s, json!(0.5)));
    assert!(passes(&s, json!(-3)));
    assert!(!passes(&s, json!("0.5")));
    let s = typed("double");
    assert!(passes(&s, json!(2.75)));
}

#[test]
fn test_numeric_precision_scale() {
    let s = schema(&json!({"$type": "numeric(5,2)"})).unwrap();
    assert!(passes(&s, json!(123.45)));
    assert!(passes(&s, json!("999.99")));
    assert!(!passes(&s, json!(1234.5)));
    assert!(!passes(&s, json!(1.234)));
}

#[test]
fn test_lat_lon_ranges() {
    assert!(passes(&typed("lat"), json!(-90)));
    assert!(passes(&typed("lat"), json!(90)));
    assert!(!passes(&typed("lat"), json!(90.5)));
    assert!(passes(&typed("lon"), json!(180)));
    assert!(!passes(&typed("lon"), json!(-180.01)));
}

// =============================================================================
// Range Directives
// =============================================================================

#[test]
fn test_min_max_directives() {
    let s = schema(&json!({"$type": "int", "$min": 5, "$max": 10})).unwrap();
    assert!(passes(&s, json!(5)));
    assert!(passes(&s, json!(10)));
    assert!(!passes(&s, json!(4)));
    assert!(!passes(&s, json!(11)));
}

#[test]
fn test_exclusive_bounds() {
    let s = schema(&json!({"$type": "number", "$minExclusive": 0, "$maxExclusive": 1})).unwrap();
    assert!(passes(&s, json!(0.5)));
    assert!(!passes(&s, json!(0)));
    assert!(!passes(&s, json!(1)));
}

// =============================================================================
// Big Integers
// =============================================================================

/// int64 enforces the signed 64-bit bounds on decimal strings.
#[test]
fn test_int64_bounds() {
    let s = typed("int64");
    assert!(passes(&s, json!("9223372036854775807")));
    assert!(!passes(&s, json!("9223372036854775808")));
    assert!(passes(&s, json!("-9223372036854775808")));
    assert!(!passes(&s, json!("-9223372036854775809")));
}

#[test]
fn test_uint64_bounds() {
    let s = typed("uint64");
    assert!(passes(&s, json!("18446744073709551615")));
    assert!(!passes(&s, json!("18446744073709551616")));
    assert!(!passes(&s, json!("-1")));
}

/// bigint takes any magnitude but insists on canonical digits.
#[test]
fn test_bigint_grammar() {
    let s = typed("bigint");
    assert!(passes(&s, json!("123456789012345678901234567890")));
    assert!(passes(&s, json!("-1")));
    assert!(passes(&s, json!("0")));
    assert!(!passes(&s, json!("007")));
    assert!(!passes(&s, json!("1.5")));
    assert!(!passes(&s, json!("")));
    assert!(!passes(&s, json!(123)));
}

/// `$min`/`$max` on big integers compare as integers, not as text.
#[test]
fn test_bigint_range_directives() {
    let s = schema(&json!({
        "$type": "bigint",
        "$min": "-10",
        "$max": "9999999999999999999999",
    }))
    .unwrap();
    assert!(passes(&s, json!("9999999999999999999999")));
    assert!(passes(&s, json!("-10")));
    assert!(!passes(&s, json!("-11")));
    assert!(!passes(&s, json!("10000000000000000000000")));
}

// =============================================================================
// Bool and Any
// =============================================================================

#[test]
fn test_bool_literals_only() {
    let s = typed("bool");
    assert!(passes(&s, json!(true)));
    assert!(passes(&s, json!(false)));
    assert!(!passes(&s, json!(1)));
    assert!(!passes(&s, json!("true")));
    assert!(!passes(&s, json!(null)));
}

/// `any` accepts everything except null (unless nullable).
#[test]
fn test_any_semantics() {
    let s = typed("any");
    assert!(passes(&s, json!(1)));
    assert!(passes(&s, json!("x")));
    assert!(passes(&s, json!([1, 2])));
    assert!(passes(&s, json!({"k": "v"})));
    assert!(!passes(&s, json!(null)));

    let s = schema(&json!({"$type": "any", "$nullable": true})).unwrap();
    assert!(passes(&s, json!(null)));
}

/// `$allowed` is observably ignored for `any`.
#[test]
fn test_any_ignores_allowed() {
    let s = schema(&json!({"$type": "any", "$allowed": [1, 2]})).unwrap();
    assert!(passes(&s, json!(3)));
    assert!(passes(&s, json!("anything")));
}

// =============================================================================
// $allowed and $exp
// =============================================================================

#[test]
fn test_allowed_literals() {
    let s = schema(&json!({"$type": "int", "$allowed": [1, 2, 3]})).unwrap();
    assert!(passes(&s, json!(2)));
    assert!(!passes(&s, json!(4)));
}

#[test]
fn test_exp_predicate() {
    let s = schema(&json!({"$type": "int", "$exp": "x % 2 == 0 && x >= 0"})).unwrap();
    assert!(passes(&s, json!(4)));
    assert!(!passes(&s, json!(3)));
    assert!(!passes(&s, json!(-2)));
}
