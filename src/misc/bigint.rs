//! Big-integer string arithmetic
//!
//! 64-bit-and-beyond integers travel as decimal strings. Classification
//! and ordering work directly on the digits, so no numeric overflow is
//! possible at any magnitude.

use std::cmp::Ordering;

/// Returns true when `s` is a canonical decimal integer:
/// an optional leading `-`, then `0` or a nonzero digit followed by
/// digits. Leading zeros, signs, and empty strings are rejected.
pub fn is_big_int(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    !(digits.len() > 1 && digits.starts_with('0'))
}

/// Total order over canonical decimal integer strings.
///
/// Sign first, then digit-count, then lexicographic digits. Both inputs
/// must satisfy [`is_big_int`]; the order is then consistent with
/// integer ordering at any magnitude (`-0` compares equal to `0`).
pub fn compare_big_int(a: &str, b: &str) -> Ordering {
    let a_neg = a.starts_with('-');
    let b_neg = b.starts_with('-');
    let da = a.strip_prefix('-').unwrap_or(a);
    let db = b.strip_prefix('-').unwrap_or(b);
    if da == "0" && db == "0" {
        return Ordering::Equal;
    }
    match (a_neg, b_neg) {
        (false, true) => return Ordering::Greater,
        (true, false) => return Ordering::Less,
        _ => {}
    }
    let magnitude = match da.len().cmp(&db.len()) {
        Ordering::Equal => da.cmp(db),
        other => other,
    };
    if a_neg {
        magnitude.reverse()
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_big_int_accepts_canonical() {
        assert!(is_big_int("0"));
        assert!(is_big_int("7"));
        assert!(is_big_int("-7"));
        assert!(is_big_int("9223372036854775808"));
        assert!(is_big_int("-18446744073709551616"));
        assert!(is_big_int("-0"));
    }

    #[test]
    fn test_is_big_int_rejects_noncanonical() {
        assert!(!is_big_int(""));
        assert!(!is_big_int("-"));
        assert!(!is_big_int("007"));
        assert!(!is_big_int("+7"));
        assert!(!is_big_int("1.5"));
        assert!(!is_big_int("1e3"));
        assert!(!is_big_int(" 1"));
    }

    #[test]
    fn test_compare_signs() {
        assert_eq!(compare_big_int("-1", "1"), Ordering::Less);
        assert_eq!(compare_big_int("1", "-1"), Ordering::Greater);
        assert_eq!(compare_big_int("0", "0"), Ordering::Equal);
        assert_eq!(compare_big_int("-0", "0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_magnitudes() {
        assert_eq!(compare_big_int("9", "10"), Ordering::Less);
        assert_eq!(compare_big_int("100", "99"), Ordering::Greater);
        assert_eq!(compare_big_int("123", "124"), Ordering::Less);
        assert_eq!(
            compare_big_int("9223372036854775807", "9223372036854775808"),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_negative_magnitudes_reverse() {
        assert_eq!(compare_big_int("-100", "-99"), Ordering::Less);
        assert_eq!(compare_big_int("-9", "-10"), Ordering::Greater);
    }
}
