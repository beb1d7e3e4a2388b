//! Domain String Type Tests
//!
//! Colors, credit cards, ISBN, MAC, IP, UUID, chars, and the string
//! flavors, exercised through the public process path.

use serde_json::json;
use trellis::{process, schema, ErrorCode, Options, Schema};

fn typed(name: &str) -> Schema {
    schema(&json!({ "$type": name })).unwrap()
}

fn passes(s: &Schema, v: serde_json::Value) -> bool {
    process(&v, s, Options::NONE, None).is_ok()
}

// =============================================================================
// Color
// =============================================================================

#[test]
fn test_color_hex_and_names() {
    let s = typed("color");
    assert!(passes(&s, json!("#F00")));
    assert!(passes(&s, json!("#ff0000")));
    assert!(passes(&s, json!("red")));
    assert!(passes(&s, json!("RebeccaPurple")));
    assert!(!passes(&s, json!("#f0")));
    assert!(!passes(&s, json!("notacolor")));
}

/// With `$cssNames: false` only hex forms pass.
#[test]
fn test_color_css_names_disabled() {
    let s = schema(&json!({"$type": "color", "$cssNames": false})).unwrap();
    assert!(!passes(&s, json!("red")));
    assert!(passes(&s, json!("#F00")));
}

#[test]
fn test_color_extra_names() {
    let s = schema(&json!({
        "$type": "color",
        "$cssNames": false,
        "$extraNames": {"brand": "#112233"},
    }))
    .unwrap();
    assert!(passes(&s, json!("brand")));
    assert!(passes(&s, json!("BRAND")));
    assert!(!passes(&s, json!("red")));
}

// =============================================================================
// Credit Card
// =============================================================================

#[test]
fn test_credit_card_luhn_only() {
    let s = typed("creditcard");
    assert!(passes(&s, json!("4532015112830366")));
    assert!(passes(&s, json!("6011111111111117")));
    // Failed checksum
    assert!(!passes(&s, json!("4532015112830367")));
    // Separators and length violations
    assert!(!passes(&s, json!("4532 0151 1283 0366")));
    assert!(!passes(&s, json!("123456789012")));
    assert!(!passes(&s, json!("12345678901234567890")));
}

// =============================================================================
// ISBN
// =============================================================================

#[test]
fn test_isbn_forms() {
    let s = typed("isbn");
    assert!(passes(&s, json!("0306406152")));
    assert!(passes(&s, json!("978-0-306-40615-7")));
    assert!(passes(&s, json!("080442957X")));
    assert!(!passes(&s, json!("0306406153")));

    let only10 = schema(&json!({"$type": "isbn", "$format": "isbn10"})).unwrap();
    assert!(passes(&only10, json!("0306406152")));
    assert!(!passes(&only10, json!("9780306406157")));

    let only13 = schema(&json!({"$type": "isbn", "$format": "isbn13"})).unwrap();
    assert!(passes(&only13, json!("9780306406157")));
    assert!(!passes(&only13, json!("0306406152")));
}

// =============================================================================
// MAC
// =============================================================================

#[test]
fn test_mac_separator_forms() {
    let s = typed("mac");
    assert!(passes(&s, json!("00:1A:2B:3C:4D:5E")));
    assert!(!passes(&s, json!("00-1A-2B-3C-4D-5E")));

    let dashed = schema(&json!({"$type": "mac", "$separator": "-"})).unwrap();
    assert!(passes(&dashed, json!("00-1a-2b-3c-4d-5e")));

    let bare = schema(&json!({"$type": "mac", "$separator": ""})).unwrap();
    assert!(passes(&bare, json!("001A2B3C4D5E")));
    assert!(!passes(&bare, json!("001A2B3C4D5")));
}

// =============================================================================
// IP
// =============================================================================

/// The IPv6 acceptance set from the compression grammar.
#[test]
fn test_ipv6_acceptance() {
    let s = typed("ip");
    assert!(passes(&s, json!("::1")));
    assert!(!passes(&s, json!(":::1")));
    assert!(!passes(&s, json!("::1::")));
    assert!(!passes(&s, json!("1:2:3:4:5:6:7:8:9")));
}

#[test]
fn test_ip_format_restriction() {
    let v4 = schema(&json!({"$type": "ip", "$format": "ipv4"})).unwrap();
    assert!(passes(&v4, json!("10.0.0.1")));
    assert!(!passes(&v4, json!("::1")));

    let v6 = schema(&json!({"$type": "ip", "$format": "ipv6"})).unwrap();
    assert!(passes(&v6, json!("::1")));
    assert!(!passes(&v6, json!("10.0.0.1")));
}

#[test]
fn test_ip_with_port() {
    let s = schema(&json!({"$type": "ip", "$port": true})).unwrap();
    assert!(passes(&s, json!("10.0.0.1:8080")));
    assert!(passes(&s, json!("[::1]:443")));
    assert!(!passes(&s, json!("10.0.0.1")));
    assert!(!passes(&s, json!("10.0.0.1:99999")));
}

// =============================================================================
// UUID
// =============================================================================

const V4: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

/// Brace handling: missing format takes unbraced only; `windows`
/// requires braces; `any` takes both.
#[test]
fn test_uuid_brace_forms() {
    let plain = typed("uuid");
    assert!(passes(&plain, json!(V4)));
    assert!(!passes(&plain, json!(format!("{{{}}}", V4))));

    let windows = schema(&json!({"$type": "uuid", "$format": "windows"})).unwrap();
    assert!(passes(&windows, json!(format!("{{{}}}", V4))));
    assert!(!passes(&windows, json!(V4)));

    let any = schema(&json!({"$type": "uuid", "$format": "any"})).unwrap();
    assert!(passes(&any, json!(V4)));
    assert!(passes(&any, json!(format!("{{{}}}", V4))));

    let rfc = schema(&json!({"$type": "uuid", "$format": "rfc"})).unwrap();
    assert!(passes(&rfc, json!(V4)));
    assert!(!passes(&rfc, json!(format!("{{{}}}", V4))));
}

#[test]
fn test_uuid_version_constraints() {
    let exact = schema(&json!({"$type": "uuid", "$version": "4"})).unwrap();
    assert!(passes(&exact, json!(V4)));

    let wrong = schema(&json!({"$type": "uuid", "$version": "1"})).unwrap();
    assert!(!passes(&wrong, json!(V4)));

    let minimum = schema(&json!({"$type": "uuid", "$version": "3+"})).unwrap();
    assert!(passes(&minimum, json!(V4)));

    let too_new = schema(&json!({"$type": "uuid", "$version": "5+"})).unwrap();
    assert!(!passes(&too_new, json!(V4)));
}

// =============================================================================
// Char and String Flavors
// =============================================================================

#[test]
fn test_char_single_code_point() {
    let s = typed("char");
    assert!(passes(&s, json!("a")));
    assert!(passes(&s, json!("😀")));
    assert!(!passes(&s, json!("ab")));
    assert!(!passes(&s, json!("")));
}

/// For char, a string-form `$allowed` enumerates characters.
#[test]
fn test_char_allowed_characters() {
    let s = schema(&json!({"$type": "char", "$allowed": "yn"})).unwrap();
    assert!(passes(&s, json!("y")));
    assert!(!passes(&s, json!("x")));
}

/// `$empty: true` additionally admits the empty string.
#[test]
fn test_char_empty_admission() {
    let s = schema(&json!({"$type": "char", "$empty": true})).unwrap();
    assert!(passes(&s, json!("")));
    assert!(passes(&s, json!("a")));
}

#[test]
fn test_string_rejects_control_chars() {
    let s = typed("string");
    assert!(passes(&s, json!("plain text")));
    assert!(!passes(&s, json!("line\nbreak")));
    assert!(!passes(&s, json!("tab\there")));
    let err = process(&json!("a\u{7}b"), &s, Options::NONE, None).unwrap_err();
    assert_eq!(err.first().code, ErrorCode::PatternMismatch);
}

#[test]
fn test_text_permits_layout_whitespace() {
    let s = typed("text");
    assert!(passes(&s, json!("line one\nline two\ttabbed\r\n")));
    assert!(!passes(&s, json!("nul\u{0}")));
}

#[test]
fn test_textline_rejects_separators() {
    let s = typed("textline");
    assert!(passes(&s, json!("one line")));
    assert!(!passes(&s, json!("a\nb")));
    assert!(!passes(&s, json!("a\u{2028}b")));
    assert!(!passes(&s, json!("a\u{2029}b")));
}

/// Empty strings are rejected unless `$empty` permits them.
#[test]
fn test_string_empty_directive() {
    let s = typed("string");
    assert!(!passes(&s, json!("")));
    let s = schema(&json!({"$type": "string", "$empty": true})).unwrap();
    assert!(passes(&s, json!("")));
}

/// String length bounds count code points.
#[test]
fn test_string_length_bounds() {
    let s = schema(&json!({"$type": "string", "$minLength": 2, "$maxLength": 4})).unwrap();
    assert!(passes(&s, json!("ab")));
    assert!(passes(&s, json!("abcd")));
    assert!(!passes(&s, json!("a")));
    assert!(!passes(&s, json!("abcde")));
    let err = process(&json!("a"), &s, Options::NONE, None).unwrap_err();
    assert_eq!(err.first().code, ErrorCode::LengthConstraint);
}
